//! Saved addresses of the signed-in user.

use serde_json::Value;

use super::segment;
use crate::client::ApiClient;
use crate::envelope::Payload;
use crate::error::ApiError;
use crate::http::RequestOptions;

#[derive(Debug, Clone, Copy)]
pub struct AddressesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AddressesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Payload, ApiError> {
        self.client.call("/user/address", RequestOptions::get()).await
    }

    pub async fn create(&self, address: Value) -> Result<Payload, ApiError> {
        self.client
            .call("/user/address", RequestOptions::post().json(address))
            .await
    }

    pub async fn update(&self, id: &str, changes: Value) -> Result<Payload, ApiError> {
        self.client
            .call(&format!("/user/address/{}", segment(id)?), RequestOptions::put().json(changes))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Payload, ApiError> {
        self.client
            .call(&format!("/user/address/{}", segment(id)?), RequestOptions::delete())
            .await
    }

    /// Mark `id` as the default address. The request has no body.
    pub async fn set_default(&self, id: &str) -> Result<Payload, ApiError> {
        self.client
            .call(&format!("/user/address/{}/default", segment(id)?), RequestOptions::put())
            .await
    }
}
