//! Async REST client core for the marketplace backend.
//!
//! # Overview
//! One generic request helper (`ApiClient::api`) plus the query encoder it
//! relies on (`generate_query`), and the domain API modules that bind fixed
//! resource paths on top of it (`client.roles()`, `client.addresses()`, ...).
//!
//! # Design
//! - `ApiClient` is stateless between calls: it holds an immutable
//!   `ClientConfig` and a pooled `reqwest::Client`, and clones share both.
//! - Each call is `build_request` (pure) → `execute` (one network attempt)
//!   → `parse_response` (pure). The pure halves are public so a host can do
//!   its own I/O.
//! - Non-2xx responses come back as `ResponseEnvelope { ok: false, .. }`;
//!   transport problems are `Err(ApiError::Network | Timeout | Cancelled)`.
//! - No retry, no caching, no user-facing logging.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod query;
pub mod resources;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use envelope::{Payload, ResponseEnvelope};
pub use error::{ApiError, ConfigError, ErrorKind};
pub use http::{Body, HttpMethod, HttpRequest, HttpResponse, RequestOptions};
pub use query::{generate_query, Query, QueryValue};
pub use tokio_util::sync::CancellationToken;
