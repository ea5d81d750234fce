//! Error types for the marketplace API client.
//!
//! # Design
//! Transport failures (`Network`, `Timeout`, `Cancelled`) are kept apart from
//! `HttpStatus`, which means the server answered with a non-2xx status. A
//! caller can always tell "could not reach the server" from "the server said
//! no" by checking `ApiError::kind().is_transport()`.

use std::time::Duration;

use thiserror::Error;

use crate::envelope::Payload;

/// Errors returned by `ApiClient` and the domain API modules.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable response arrived: DNS, connect or I/O failure, or the body
    /// stream broke after the status line (the message names that status).
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("request cancelled")]
    Cancelled,

    /// The server responded outside 200..=299.
    #[error("HTTP {status}: {error}")]
    HttpStatus { status: u16, error: Payload },

    /// A 2xx response declared JSON but its body did not parse.
    #[error("invalid JSON in HTTP {status} response: {message}")]
    Decode { status: u16, message: String },

    /// A request body could not be converted to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request could not be constructed (bad header name, bad URL).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Coarse classification of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkFailure,
    Timeout,
    Cancelled,
    HttpStatusFailure,
    DecodeFailure,
    Serialization,
    InvalidRequest,
}

impl ErrorKind {
    /// True when no complete HTTP response was received.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ErrorKind::NetworkFailure | ErrorKind::Timeout | ErrorKind::Cancelled
        )
    }
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network(_) => ErrorKind::NetworkFailure,
            ApiError::Timeout => ErrorKind::Timeout,
            ApiError::Cancelled => ErrorKind::Cancelled,
            ApiError::HttpStatus { .. } => ErrorKind::HttpStatusFailure,
            ApiError::Decode { .. } => ErrorKind::DecodeFailure,
            ApiError::Serialization(_) => ErrorKind::Serialization,
            ApiError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// HTTP status, if the server produced a complete response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } | ApiError::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_builder() {
            ApiError::InvalidRequest(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Errors raised while assembling a `ClientConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid timeout {0:?}: expected a positive number of seconds")]
    InvalidTimeout(String),

    #[error("timeout must be non-zero, got {0:?}")]
    ZeroTimeout(Duration),

    #[error("invalid user agent {0:?}: not a valid header value")]
    InvalidUserAgent(String),
}
