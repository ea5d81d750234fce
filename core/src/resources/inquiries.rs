use serde_json::Value;

use crate::client::ApiClient;
use crate::envelope::Payload;
use crate::error::ApiError;
use crate::http::RequestOptions;
use crate::query::Query;

/// Buyer inquiries sent to sellers.
#[derive(Debug, Clone, Copy)]
pub struct InquiriesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> InquiriesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: Query) -> Result<Payload, ApiError> {
        self.client
            .call("/buyer/inquiries", RequestOptions::get().params(query))
            .await
    }

    pub async fn create(&self, inquiry: Value) -> Result<Payload, ApiError> {
        self.client
            .call("/buyer/inquiries", RequestOptions::post().json(inquiry))
            .await
    }
}
