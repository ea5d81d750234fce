//! C-ABI wrapper around `marketplace-core`.
//!
//! # Overview
//! Exposes the pure halves of the marketplace client so a host written in
//! any language with a C FFI can encode queries, build requests, execute
//! them with its own HTTP stack, and normalize the responses.
//!
//! The client handle wraps a full `ApiClient`, so reqwest and tokio are linked
//! in, but nothing here ever drives them: no runtime is started and no socket
//! is opened. All I/O belongs to the host.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - JSON crosses the boundary as text: query parameters and bodies go in
//!   as JSON, payloads come back as JSON.
//! - The C caller owns all returned pointers and must call the matching
//!   `mp_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use marketplace_core::{
    generate_query, ApiClient, Body, ClientConfig, HttpMethod, HttpResponse, Query,
    RequestOptions,
};

use types::*;

/// Borrow a C string as UTF-8. `None` for null or invalid UTF-8.
fn c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Parse an optional JSON argument. `Ok(None)` when `ptr` is null.
fn optional_json(ptr: *const c_char) -> Result<Option<serde_json::Value>, ()> {
    if ptr.is_null() {
        return Ok(None);
    }
    let text = c_str(ptr).ok_or(())?;
    serde_json::from_str(text).map(Some).map_err(|_| ())
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client bound to `base_url`.
///
/// Returns null if `base_url` is null, not UTF-8, or not an absolute
/// http(s) URL. Free with `mp_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn mp_client_new(base_url: *const c_char) -> *mut FfiApiClient {
    catch_unwind(|| {
        let Some(url) = c_str(base_url) else {
            return std::ptr::null_mut();
        };
        let client = ClientConfig::new(url)
            .ok()
            .and_then(|config| ApiClient::new(config).ok());
        match client {
            Some(inner) => Box::into_raw(Box::new(FfiApiClient { inner })),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `mp_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn mp_client_free(client: *mut FfiApiClient) {
    if !client.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(client) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Query encoding
// ---------------------------------------------------------------------------

/// Encode a JSON object as a query string (no leading `?`).
///
/// Returns null if `params_json` is null or is not a JSON object. Free the
/// result with `mp_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn mp_generate_query(params_json: *const c_char) -> *mut c_char {
    catch_unwind(|| {
        let query = match optional_json(params_json) {
            Ok(Some(value)) => Query::from_json(&value),
            _ => None,
        };
        match query.map(|q| CString::new(generate_query(&q))) {
            Some(Ok(encoded)) => encoded.into_raw(),
            _ => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Request building
// ---------------------------------------------------------------------------

/// Build the request for `method path`.
///
/// `params_json` (a JSON object) and `body_json` (any JSON value) may be
/// null. A body on `GET`/`DELETE` is ignored. Returns null if `client` or
/// `path` is null, or if either JSON argument does not parse. Free with
/// `mp_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn mp_build_request(
    client: *const FfiApiClient,
    method: FfiHttpMethod,
    path: *const c_char,
    params_json: *const c_char,
    body_json: *const c_char,
) -> *mut FfiHttpRequest {
    // reqwest's client is not `RefUnwindSafe`; nothing is observed after a panic.
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(path) = c_str(path) else {
            return std::ptr::null_mut();
        };

        let mut options = RequestOptions::new(HttpMethod::from(method));
        match optional_json(params_json) {
            Ok(Some(value)) => match Query::from_json(&value) {
                Some(query) => options = options.params(query),
                None => return std::ptr::null_mut(),
            },
            Ok(None) => {}
            Err(()) => return std::ptr::null_mut(),
        }
        match optional_json(body_json) {
            Ok(Some(value)) => options = options.body(Body::Json(value)),
            Ok(None) => {}
            Err(()) => return std::ptr::null_mut(),
        }

        client
            .inner
            .build_request(path, &options)
            .ok()
            .and_then(FfiHttpRequest::from_core)
            .unwrap_or(std::ptr::null_mut())
    }))
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

fn ffi_response_to_core(resp: &FfiHttpResponse) -> Result<HttpResponse, String> {
    let mut headers = Vec::new();
    if !resp.content_type.is_null() {
        let content_type =
            c_str(resp.content_type).ok_or_else(|| "content_type is not valid UTF-8".to_string())?;
        headers.push(("content-type".to_string(), content_type.to_string()));
    }
    let body = if resp.body.is_null() {
        Vec::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }.to_bytes().to_vec()
    };
    Ok(HttpResponse {
        status: resp.status,
        headers,
        body,
    })
}

/// Normalize a response the host received.
///
/// Never returns null. Free with `mp_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn mp_parse_response(response: *const FfiHttpResponse) -> *mut FfiApiResult {
    catch_unwind(|| {
        if response.is_null() {
            return FfiApiResult::null_arg("response");
        }
        let resp = unsafe { &*response };
        let core_resp = match ffi_response_to_core(resp) {
            Ok(r) => r,
            Err(msg) => return FfiApiResult::invalid_arg(msg),
        };
        match ApiClient::parse_response(core_resp) {
            Ok(envelope) => FfiApiResult::from_envelope(envelope),
            Err(e) => FfiApiResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiApiResult::panic("panic in mp_parse_response"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by `mp_build_request`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn mp_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.url.is_null() {
            drop(unsafe { CString::from_raw(req.url) });
        }
        if !req.body.is_null() {
            drop(unsafe { CString::from_raw(req.body) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free a result returned by `mp_parse_response`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn mp_free_result(result: *mut FfiApiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.payload_json.is_null() {
            drop(unsafe { CString::from_raw(result.payload_json) });
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn mp_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
