//! Normalized response envelope handed back to every caller.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// A decoded response body.
///
/// Serializes untagged: JSON as itself, text as a JSON string, empty as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Json(Value),
    Text(String),
    Empty,
}

impl Payload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty)
    }

    /// Collapse into a JSON value (`Text` becomes a string, `Empty` becomes null).
    pub fn into_json(self) -> Value {
        match self {
            Payload::Json(v) => v,
            Payload::Text(s) => Value::String(s),
            Payload::Empty => Value::Null,
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Json(v) => write!(f, "{v}"),
            Payload::Text(s) => f.write_str(s),
            Payload::Empty => f.write_str("<empty body>"),
        }
    }
}

/// Outcome of a request that reached the server.
///
/// Exactly one of `data` (when `ok`) or `error` (when not) is populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    pub ok: bool,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Payload>,
}

impl ResponseEnvelope {
    pub fn success(status: u16, data: Payload) -> Self {
        Self {
            ok: true,
            status,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(status: u16, error: Payload) -> Self {
        Self {
            ok: false,
            status,
            data: None,
            error: Some(error),
        }
    }

    /// Success payload, or `ApiError::HttpStatus` for a failed response.
    pub fn into_result(self) -> Result<Payload, ApiError> {
        if self.ok {
            Ok(self.data.unwrap_or(Payload::Empty))
        } else {
            Err(ApiError::HttpStatus {
                status: self.status,
                error: self.error.unwrap_or(Payload::Empty),
            })
        }
    }
}
