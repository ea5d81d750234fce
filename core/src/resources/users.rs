//! Admin user management.

use serde_json::Value;

use super::segment;
use crate::client::ApiClient;
use crate::envelope::Payload;
use crate::error::ApiError;
use crate::http::RequestOptions;
use crate::query::Query;

#[derive(Debug, Clone, Copy)]
pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: Query) -> Result<Payload, ApiError> {
        self.client
            .call("/admin/users/list", RequestOptions::get().params(query))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Payload, ApiError> {
        self.client
            .call(&format!("/admin/users/{}", segment(id)?), RequestOptions::get())
            .await
    }

    /// Create a user; the role assignment travels inside `user`.
    pub async fn create(&self, user: Value) -> Result<Payload, ApiError> {
        self.client
            .call("/admin/users/new", RequestOptions::post().json(user))
            .await
    }

    pub async fn update(&self, id: &str, changes: Value) -> Result<Payload, ApiError> {
        self.client
            .call(&format!("/admin/users/{}", segment(id)?), RequestOptions::put().json(changes))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Payload, ApiError> {
        self.client
            .call(&format!("/admin/users/{}", segment(id)?), RequestOptions::delete())
            .await
    }
}
