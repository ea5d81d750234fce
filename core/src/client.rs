//! Async HTTP client for the marketplace REST API.
//!
//! # Design
//! `ApiClient` holds an immutable `ClientConfig` and a pooled
//! `reqwest::Client`; it carries no per-call state. Every call is split into
//! three steps:
//!
//! 1. `build_request` turns a path and `RequestOptions` into an `HttpRequest`
//!    (pure).
//! 2. `execute` performs exactly one network round trip (the only I/O).
//! 3. `parse_response` normalizes the `HttpResponse` into a
//!    `ResponseEnvelope` (pure).
//!
//! `api` chains the three. Hosts that do their own I/O (see the FFI crate)
//! call the pure halves directly. There is no retry and no caching; callers
//! that need either wrap `api` themselves.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::ClientConfig;
use crate::envelope::{Payload, ResponseEnvelope};
use crate::error::ApiError;
use crate::http::{
    Body, HttpMethod, HttpRequest, HttpResponse, RequestOptions, APPLICATION_JSON, CONTENT_TYPE,
};
use crate::query::{generate_query, Query};

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("could not build HTTP client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve `path` against the base URL and append the encoded query, if any.
    pub fn url_for(&self, path: &str, params: Option<&Query>) -> String {
        let mut url = String::from(self.config.base_url());
        if !path.starts_with('/') {
            url.push('/');
        }
        url.push_str(path);

        if let Some(params) = params {
            let query = generate_query(params);
            if !query.is_empty() {
                url.push(if path.contains('?') { '&' } else { '?' });
                url.push_str(&query);
            }
        }
        url
    }

    /// Describe the request `api` would send, without sending it.
    ///
    /// Bodies on `GET`/`DELETE` are dropped, not rejected.
    pub fn build_request(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<HttpRequest, ApiError> {
        let url = self.url_for(path, options.params.as_ref());
        let mut headers = Vec::new();

        let body = match &options.body {
            Some(_) if !options.method.allows_body() => {
                debug!(method = %options.method, %url, "ignoring body on bodyless method");
                None
            }
            Some(Body::Json(value)) => {
                let bytes =
                    serde_json::to_vec(value).map_err(|e| ApiError::Serialization(e.to_string()))?;
                headers.push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
                Some(bytes)
            }
            Some(Body::Raw {
                content_type,
                bytes,
            }) => {
                if let Some(content_type) = content_type {
                    headers.push((CONTENT_TYPE.to_string(), content_type.clone()));
                }
                Some(bytes.clone())
            }
            None => None,
        };

        headers.extend(options.headers.iter().cloned());

        Ok(HttpRequest {
            method: options.method,
            url,
            headers,
            body,
            timeout: Some(options.timeout.unwrap_or(self.config.timeout())),
        })
    }

    /// Normalize a received response.
    ///
    /// A 2xx body that claims JSON but does not parse is a `Decode` error; a
    /// non-2xx body that fails to parse falls back to raw text.
    pub fn parse_response(response: HttpResponse) -> Result<ResponseEnvelope, ApiError> {
        let status = response.status;
        let is_json = response.is_json();
        let success = response.is_success();
        let body = response.body;

        if body.is_empty() {
            return Ok(if success {
                ResponseEnvelope::success(status, Payload::Empty)
            } else {
                ResponseEnvelope::failure(status, Payload::Empty)
            });
        }

        if success {
            let data = if is_json {
                let value: Value = serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
                    status,
                    message: e.to_string(),
                })?;
                Payload::Json(value)
            } else {
                Payload::Text(String::from_utf8_lossy(&body).into_owned())
            };
            return Ok(ResponseEnvelope::success(status, data));
        }

        let error = match serde_json::from_slice::<Value>(&body) {
            Ok(value) if is_json => Payload::Json(value),
            _ => Payload::Text(String::from_utf8_lossy(&body).into_owned()),
        };
        Ok(ResponseEnvelope::failure(status, error))
    }

    /// Perform one network round trip for `request`.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let started = Instant::now();
        debug!(method = %request.method, url = %request.url, "sending request");

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // A body stream that breaks after the status line is still a network failure.
        let body = response
            .bytes()
            .await
            .map_err(|e| match ApiError::from(e) {
                ApiError::Network(reason) => {
                    ApiError::Network(format!("reading HTTP {status} response body: {reason}"))
                }
                other => other,
            })?
            .to_vec();

        debug!(
            method = %request.method,
            url = %request.url,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response received"
        );

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    /// Send a request to `path` and normalize whatever comes back.
    ///
    /// Non-2xx responses are `Ok` envelopes with `ok == false`; only transport
    /// and decode failures are `Err`.
    pub async fn api(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseEnvelope, ApiError> {
        let request = self.build_request(path, &options)?;
        let response = self.execute(request).await?;
        Self::parse_response(response)
    }

    /// Like `api`, but resolves to `ApiError::Cancelled` as soon as `cancel`
    /// fires. The in-flight request is dropped, which aborts it.
    pub async fn api_with_cancel(
        &self,
        path: &str,
        options: RequestOptions,
        cancel: &CancellationToken,
    ) -> Result<ResponseEnvelope, ApiError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(path, "request cancelled");
                Err(ApiError::Cancelled)
            }
            result = self.api(path, options) => result,
        }
    }

    pub async fn get(&self, path: &str, params: Query) -> Result<ResponseEnvelope, ApiError> {
        self.api(path, RequestOptions::get().params(params)).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> Result<ResponseEnvelope, ApiError> {
        self.api(path, RequestOptions::post().json(body)).await
    }

    pub async fn put_json(&self, path: &str, body: Value) -> Result<ResponseEnvelope, ApiError> {
        self.api(path, RequestOptions::put().json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ResponseEnvelope, ApiError> {
        self.api(path, RequestOptions::delete()).await
    }

    /// `api` followed by `into_result`, for the domain modules.
    pub(crate) async fn call(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Payload, ApiError> {
        self.api(path, options).await?.into_result()
    }
}
