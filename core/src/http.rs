//! HTTP transport types and request descriptors.
//!
//! # Design
//! `HttpRequest` and `HttpResponse` describe a round trip as plain data. The
//! client builds the former and parses the latter without touching the
//! network; `ApiClient::execute` (or a foreign host through the C ABI)
//! performs the I/O in between. All fields are owned so values can cross
//! task and FFI boundaries freely.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::query::Query;

pub const CONTENT_TYPE: &str = "content-type";
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether a request body is sent for this method.
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body together with how it is encoded on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Serialized to JSON text and sent as `application/json`.
    Json(Value),
    /// Sent unchanged, e.g. a multipart payload produced elsewhere.
    Raw {
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

impl Body {
    /// Convert any serializable value into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_value(value)
            .map(Body::Json)
            .map_err(|e| ApiError::Serialization(e.to_string()))
    }

    pub fn raw(content_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Body::Raw {
            content_type: Some(content_type.into()),
            bytes: bytes.into(),
        }
    }
}

/// Everything about a call except its path.
///
/// Defaults to a bare `GET` with no query, body, or extra headers.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub params: Option<Query>,
    pub body: Option<Body>,
    pub headers: Vec<(String, String)>,
    /// Overrides the client-wide timeout for this call only.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(HttpMethod::Get)
    }

    pub fn post() -> Self {
        Self::new(HttpMethod::Post)
    }

    pub fn put() -> Self {
        Self::new(HttpMethod::Put)
    }

    pub fn delete() -> Self {
        Self::new(HttpMethod::Delete)
    }

    pub fn params(mut self, params: Query) -> Self {
        self.params = Some(params);
        self
    }

    pub fn body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    pub fn json(self, value: Value) -> Self {
        self.body(Body::Json(value))
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL including any query string.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    /// `build_request` always fills this with the per-call override or the
    /// client's configured timeout.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    /// True when the declared media type is `application/json` or a `+json` type.
    pub fn is_json(&self) -> bool {
        self.content_type().is_some_and(is_json_media_type)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

pub(crate) fn is_json_media_type(content_type: &str) -> bool {
    let media = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    media == APPLICATION_JSON || media.ends_with("+json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(content_type: Option<&str>) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: content_type
                .map(|ct| vec![("Content-Type".to_string(), ct.to_string())])
                .unwrap_or_default(),
            body: Vec::new(),
        }
    }

    #[test]
    fn json_content_types_are_detected() {
        assert!(response(Some("application/json")).is_json());
        assert!(response(Some("application/json; charset=utf-8")).is_json());
        assert!(response(Some("Application/JSON")).is_json());
        assert!(response(Some("application/problem+json")).is_json());
        assert!(!response(Some("text/plain")).is_json());
        assert!(!response(Some("text/html; charset=utf-8")).is_json());
        assert!(!response(None).is_json());
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let resp = response(Some("text/plain"));
        assert_eq!(resp.header("content-type"), Some("text/plain"));
        assert_eq!(resp.header("CONTENT-TYPE"), Some("text/plain"));
        assert_eq!(resp.header("accept"), None);
    }

    #[test]
    fn only_post_and_put_carry_bodies() {
        assert!(!HttpMethod::Get.allows_body());
        assert!(!HttpMethod::Delete.allows_body());
        assert!(HttpMethod::Post.allows_body());
        assert!(HttpMethod::Put.allows_body());
    }

    #[test]
    fn options_default_to_get() {
        let opts = RequestOptions::default();
        assert_eq!(opts.method, HttpMethod::Get);
        assert!(opts.params.is_none());
        assert!(opts.body.is_none());
        assert!(opts.headers.is_empty());
    }

    #[test]
    fn body_json_serializes_structs() {
        #[derive(Serialize)]
        struct NewRole<'a> {
            name: &'a str,
        }
        let body = Body::json(&NewRole { name: "buyer" }).unwrap();
        assert_eq!(body, Body::Json(serde_json::json!({"name": "buyer"})));
    }

    #[test]
    fn success_range_is_2xx() {
        let mut resp = response(None);
        for (status, ok) in [(199, false), (200, true), (204, true), (299, true), (300, false), (404, false)] {
            resp.status = status;
            assert_eq!(resp.is_success(), ok, "status {status}");
        }
    }
}
