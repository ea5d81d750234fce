//! Buy requirements posted by buyers for sellers to quote on.

use serde_json::Value;

use super::segment;
use crate::client::ApiClient;
use crate::envelope::Payload;
use crate::error::ApiError;
use crate::http::RequestOptions;
use crate::query::Query;

#[derive(Debug, Clone, Copy)]
pub struct BuyRequirementsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BuyRequirementsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: Query) -> Result<Payload, ApiError> {
        self.client
            .call("/buyer/requirements", RequestOptions::get().params(query))
            .await
    }

    pub async fn create(&self, requirement: Value) -> Result<Payload, ApiError> {
        self.client
            .call("/buyer/requirements", RequestOptions::post().json(requirement))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Payload, ApiError> {
        self.client
            .call(&format!("/buyer/requirements/{}", segment(id)?), RequestOptions::delete())
            .await
    }
}
