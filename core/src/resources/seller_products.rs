use serde_json::Value;

use super::segment;
use crate::client::ApiClient;
use crate::envelope::Payload;
use crate::error::ApiError;
use crate::http::{Body, RequestOptions};
use crate::query::Query;

/// Products listed by the signed-in seller.
#[derive(Debug, Clone, Copy)]
pub struct SellerProductsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SellerProductsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: Query) -> Result<Payload, ApiError> {
        self.client
            .call("/seller/products", RequestOptions::get().params(query))
            .await
    }

    pub async fn create(&self, product: Value) -> Result<Payload, ApiError> {
        self.client
            .call("/seller/products", RequestOptions::post().json(product))
            .await
    }

    /// Create a product from a pre-encoded form (e.g. multipart with images).
    pub async fn create_with_form(&self, form: Body) -> Result<Payload, ApiError> {
        self.client
            .call("/seller/products", RequestOptions::post().body(form))
            .await
    }

    pub async fn update(&self, id: &str, changes: Value) -> Result<Payload, ApiError> {
        self.client
            .call(
                &format!("/seller/products/{}", segment(id)?),
                RequestOptions::put().json(changes),
            )
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Payload, ApiError> {
        self.client
            .call(&format!("/seller/products/{}", segment(id)?), RequestOptions::delete())
            .await
    }
}
