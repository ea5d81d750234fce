//! Public catalog listings. Both endpoints accept paging and search
//! parameters such as `page`, `limit`, and `search`.

use crate::client::ApiClient;
use crate::envelope::Payload;
use crate::error::ApiError;
use crate::http::RequestOptions;
use crate::query::Query;

#[derive(Debug, Clone, Copy)]
pub struct CatalogApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CatalogApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn brands(&self, query: Query) -> Result<Payload, ApiError> {
        self.client
            .call("/catalog/brands", RequestOptions::get().params(query))
            .await
    }

    pub async fn categories(&self, query: Query) -> Result<Payload, ApiError> {
        self.client
            .call("/catalog/categories", RequestOptions::get().params(query))
            .await
    }
}
