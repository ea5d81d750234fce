use crate::client::ApiClient;
use crate::envelope::Payload;
use crate::error::ApiError;
use crate::http::{Body, RequestOptions};

const PATH: &str = "/seller/brand-verification";

/// Seller brand-ownership verification. Submissions carry documents, so the
/// body is taken pre-encoded.
#[derive(Debug, Clone, Copy)]
pub struct BrandVerificationApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BrandVerificationApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn submit(&self, submission: Body) -> Result<Payload, ApiError> {
        self.client
            .call(PATH, RequestOptions::post().body(submission))
            .await
    }

    pub async fn status(&self) -> Result<Payload, ApiError> {
        self.client.call(PATH, RequestOptions::get()).await
    }
}
