//! Drives the C ABI the way a host would.
//!
//! # Design
//! Starts the mock server on a random port, asks the library to build each
//! request, executes it with ureq (standing in for the host's HTTP stack), and
//! hands the raw response back to `mp_parse_response`. No Rust async runtime
//! is involved on the client side.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use marketplace_ffi::types::{FfiErrorCode, FfiHttpMethod, FfiHttpRequest, FfiHttpResponse};
use marketplace_ffi::{
    mp_build_request, mp_client_free, mp_client_new, mp_free_request, mp_free_result,
    mp_parse_response,
};
use serde_json::Value;

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn read(ptr: *const c_char) -> String {
    unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string()
}

struct HostResponse {
    status: u16,
    content_type: Option<CString>,
    body: CString,
}

/// Execute a built request with ureq, returning 4xx/5xx as data.
fn execute(req: &FfiHttpRequest) -> HostResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let url = read(req.url);
    let headers: Vec<(String, String)> = if req.headers.is_null() {
        Vec::new()
    } else {
        unsafe { std::slice::from_raw_parts(req.headers, req.headers_len as usize) }
            .iter()
            .map(|h| (read(h.key), read(h.value)))
            .collect()
    };
    let body = (!req.body.is_null()).then(|| read(req.body));

    let mut response = match req.method {
        FfiHttpMethod::Get => {
            let mut builder = agent.get(&url);
            for (k, v) in &headers {
                builder = builder.header(k, v);
            }
            builder.call()
        }
        FfiHttpMethod::Delete => {
            let mut builder = agent.delete(&url);
            for (k, v) in &headers {
                builder = builder.header(k, v);
            }
            builder.call()
        }
        FfiHttpMethod::Post | FfiHttpMethod::Put => {
            let mut builder = if req.method == FfiHttpMethod::Post {
                agent.post(&url)
            } else {
                agent.put(&url)
            };
            for (k, v) in &headers {
                builder = builder.header(k, v);
            }
            match body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|v| CString::new(v).unwrap());
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HostResponse {
        status,
        content_type,
        body: CString::new(body).unwrap(),
    }
}

/// Build, execute, and parse one call. Returns the code, status, and payload.
fn round_trip(
    client: *const marketplace_ffi::types::FfiApiClient,
    method: FfiHttpMethod,
    path: &str,
    body: Option<&str>,
) -> (FfiErrorCode, u16, Option<Value>) {
    let path = CString::new(path).unwrap();
    let body = body.map(|b| CString::new(b).unwrap());
    let req = mp_build_request(
        client,
        method,
        path.as_ptr(),
        std::ptr::null(),
        body.as_ref().map_or(std::ptr::null(), |b| b.as_ptr()),
    );
    assert!(!req.is_null());

    let host = execute(unsafe { &*req });
    mp_free_request(req);

    let resp = FfiHttpResponse {
        status: host.status,
        content_type: host
            .content_type
            .as_ref()
            .map_or(std::ptr::null(), |c| c.as_ptr()),
        body: host.body.as_ptr(),
    };
    let result = mp_parse_response(&resp);
    let r = unsafe { &*result };
    let payload = (!r.payload_json.is_null())
        .then(|| serde_json::from_str(&read(r.payload_json)).unwrap());
    let out = (r.error_code, r.http_status, payload);
    mp_free_result(result);
    out
}

#[test]
fn role_lifecycle_through_the_c_abi() {
    let base = CString::new(start_server()).unwrap();
    let client = mp_client_new(base.as_ptr());
    assert!(!client.is_null());

    // Step 1: list is empty.
    let (code, status, payload) = round_trip(client, FfiHttpMethod::Get, "/admin/roles/list", None);
    assert_eq!(code, FfiErrorCode::Ok);
    assert_eq!(status, 200);
    assert_eq!(payload, Some(serde_json::json!([])));

    // Step 2: create.
    let (code, status, payload) = round_trip(
        client,
        FfiHttpMethod::Post,
        "/admin/roles/new",
        Some(r#"{"name":"buyer","permissions":["orders:read"]}"#),
    );
    assert_eq!(code, FfiErrorCode::Ok);
    assert_eq!(status, 201);
    let created = payload.unwrap();
    assert_eq!(created["name"], "buyer");
    let id = created["id"].as_str().unwrap().to_string();

    // Step 3: get.
    let (code, _, payload) =
        round_trip(client, FfiHttpMethod::Get, &format!("/admin/roles/{id}"), None);
    assert_eq!(code, FfiErrorCode::Ok);
    assert_eq!(payload.unwrap(), created);

    // Step 4: delete returns no content, surfaced as JSON null.
    let (code, status, payload) =
        round_trip(client, FfiHttpMethod::Delete, &format!("/admin/roles/{id}"), None);
    assert_eq!(code, FfiErrorCode::Ok);
    assert_eq!(status, 204);
    assert_eq!(payload, Some(Value::Null));

    // Step 5: get after delete carries the backend's error payload.
    let (code, status, payload) =
        round_trip(client, FfiHttpMethod::Get, &format!("/admin/roles/{id}"), None);
    assert_eq!(code, FfiErrorCode::HttpStatus);
    assert_eq!(status, 404);
    assert_eq!(payload.unwrap()["message"], "not found");

    mp_client_free(client);
}

#[test]
fn malformed_success_body_is_decode_error() {
    let base = CString::new(start_server()).unwrap();
    let client = mp_client_new(base.as_ptr());

    let (code, status, payload) = round_trip(client, FfiHttpMethod::Get, "/test/malformed", None);
    assert_eq!(code, FfiErrorCode::Decode);
    assert_eq!(status, 200);
    assert!(payload.is_none());

    mp_client_free(client);
}
