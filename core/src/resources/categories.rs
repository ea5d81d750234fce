//! Admin category management.

use serde_json::Value;

use super::segment;
use crate::client::ApiClient;
use crate::envelope::Payload;
use crate::error::ApiError;
use crate::http::RequestOptions;
use crate::query::Query;

#[derive(Debug, Clone, Copy)]
pub struct CategoriesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CategoriesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: Query) -> Result<Payload, ApiError> {
        self.client
            .call("/admin/category/list", RequestOptions::get().params(query))
            .await
    }

    pub async fn create(&self, category: Value) -> Result<Payload, ApiError> {
        self.client
            .call("/admin/category/new", RequestOptions::post().json(category))
            .await
    }

    pub async fn update(&self, id: &str, changes: Value) -> Result<Payload, ApiError> {
        self.client
            .call(&format!("/admin/category/{}", segment(id)?), RequestOptions::put().json(changes))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Payload, ApiError> {
        self.client
            .call(&format!("/admin/category/{}", segment(id)?), RequestOptions::delete())
            .await
    }
}
