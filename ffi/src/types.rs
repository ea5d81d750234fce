//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible fields: `*mut c_char`
//! instead of `String`, pointer + length instead of `Vec`, and explicit enum
//! discriminants. Conversions live here so `lib.rs` stays focused on the
//! `extern "C"` surface. Every pointer handed to C is owned by C until it is
//! passed back to the matching `mp_free_*` function.

use std::ffi::CString;
use std::os::raw::c_char;

use marketplace_core::{ApiError, ErrorKind, HttpMethod, HttpRequest, ResponseEnvelope};

/// Opaque handle to an `ApiClient`.
pub struct FfiApiClient {
    pub(crate) inner: marketplace_core::ApiClient,
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

impl From<FfiHttpMethod> for HttpMethod {
    fn from(m: FfiHttpMethod) -> Self {
        match m {
            FfiHttpMethod::Get => HttpMethod::Get,
            FfiHttpMethod::Post => HttpMethod::Post,
            FfiHttpMethod::Put => HttpMethod::Put,
            FfiHttpMethod::Delete => HttpMethod::Delete,
        }
    }
}

#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A request the C host should execute.
///
/// `body` is null when nothing should be sent. `timeout_ms` is the client's
/// configured timeout; the host should abandon the call once it elapses.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
    pub timeout_ms: u64,
}

impl FfiHttpRequest {
    /// Move a core `HttpRequest` onto the heap as C data.
    ///
    /// Returns `None` if any string contains an interior NUL; nothing is
    /// leaked in that case.
    pub(crate) fn from_core(req: HttpRequest) -> Option<*mut Self> {
        let url = CString::new(req.url).ok()?;
        let body = match req.body {
            Some(b) => Some(CString::new(b).ok()?),
            None => None,
        };
        let headers: Vec<(CString, CString)> = req
            .headers
            .into_iter()
            .map(|(k, v)| Some((CString::new(k).ok()?, CString::new(v).ok()?)))
            .collect::<Option<_>>()?;

        let headers_len = headers.len() as u32;
        let headers = if headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: k.into_raw(),
                    value: v.into_raw(),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        let ffi_req = Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: url.into_raw(),
            headers,
            headers_len,
            body: body.map(CString::into_raw).unwrap_or(std::ptr::null_mut()),
            timeout_ms: req.timeout.map(|t| t.as_millis() as u64).unwrap_or(0),
        });
        Some(Box::into_raw(ffi_req))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not freed by us)
// ---------------------------------------------------------------------------

/// An HTTP response as received by the C host.
///
/// `content_type` and `body` may be null (treated as absent / empty).
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub content_type: *const c_char,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    HttpStatus = 1,
    Decode = 2,
    Serialization = 3,
    InvalidArg = 4,
    NullArg = 5,
    Panic = 6,
}

/// Result envelope for `mp_parse_response`.
///
/// On success `error_code` is `Ok` and `payload_json` holds the response data
/// as JSON text (`null` for an empty body, a JSON string for a text body).
/// On `HttpStatus`, `payload_json` holds the server's error payload the same
/// way. For every other code `payload_json` is null.
#[repr(C)]
pub struct FfiApiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub payload_json: *mut c_char,
}

fn c_string_lossy(s: String) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

impl FfiApiResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: Option<String>,
        http_status: u16,
        payload_json: Option<String>,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiApiResult {
            error_code,
            error_message: error_message.map(c_string_lossy).unwrap_or(std::ptr::null_mut()),
            http_status,
            payload_json: payload_json.map(c_string_lossy).unwrap_or(std::ptr::null_mut()),
        }))
    }

    pub(crate) fn from_envelope(envelope: ResponseEnvelope) -> *mut Self {
        let status = envelope.status;
        match envelope.into_result() {
            Ok(data) => Self::boxed(FfiErrorCode::Ok, None, status, Some(data.into_json().to_string())),
            Err(e) => Self::from_error(e),
        }
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let message = err.to_string();
        let status = err.status().unwrap_or(0);
        match err {
            ApiError::HttpStatus { error, .. } => Self::boxed(
                FfiErrorCode::HttpStatus,
                Some(message),
                status,
                Some(error.into_json().to_string()),
            ),
            other => {
                let code = match other.kind() {
                    ErrorKind::DecodeFailure => FfiErrorCode::Decode,
                    ErrorKind::Serialization => FfiErrorCode::Serialization,
                    _ => FfiErrorCode::InvalidArg,
                };
                Self::boxed(code, Some(message), status, None)
            }
        }
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(FfiErrorCode::NullArg, Some(format!("null argument: {name}")), 0, None)
    }

    pub(crate) fn invalid_arg(msg: String) -> *mut Self {
        Self::boxed(FfiErrorCode::InvalidArg, Some(msg), 0, None)
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(FfiErrorCode::Panic, Some(msg.to_string()), 0, None)
    }
}
