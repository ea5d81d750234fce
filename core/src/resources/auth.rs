//! Registration and session endpoints.

use serde_json::Value;

use crate::client::ApiClient;
use crate::envelope::Payload;
use crate::error::ApiError;
use crate::http::RequestOptions;

#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn register(&self, registration: Value) -> Result<Payload, ApiError> {
        self.client
            .call("/auth/register", RequestOptions::post().json(registration))
            .await
    }

    pub async fn login(&self, credentials: Value) -> Result<Payload, ApiError> {
        self.client
            .call("/auth/login", RequestOptions::post().json(credentials))
            .await
    }

    pub async fn logout(&self) -> Result<Payload, ApiError> {
        self.client.call("/auth/logout", RequestOptions::post()).await
    }

    pub async fn me(&self) -> Result<Payload, ApiError> {
        self.client.call("/auth/me", RequestOptions::get()).await
    }
}
