//! Domain API modules.
//!
//! Each module is a borrowed view over `ApiClient` that binds the backend's
//! fixed resource paths. They template ids into paths and delegate to
//! `ApiClient::api`; nothing here interprets the payloads.
//!
//! An id always lands in exactly one path segment: it is percent-encoded
//! (`/`, `?`, `#`, `%` included) and `.`, `..` or empty ids are refused.

mod addresses;
mod auth;
mod brand_verification;
mod buy_requirements;
mod catalog;
mod categories;
mod inquiries;
mod roles;
mod seller_products;
mod users;

pub use addresses::AddressesApi;
pub use auth::AuthApi;
pub use brand_verification::BrandVerificationApi;
pub use buy_requirements::BuyRequirementsApi;
pub use catalog::CatalogApi;
pub use categories::CategoriesApi;
pub use inquiries::InquiriesApi;
pub use roles::RolesApi;
pub use seller_products::SellerProductsApi;
pub use users::UsersApi;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Characters escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Encode `id` as one path segment.
pub(crate) fn segment(id: &str) -> Result<String, ApiError> {
    if matches!(id, "" | "." | "..") {
        return Err(ApiError::InvalidRequest(format!("{id:?} is not a valid resource id")));
    }
    Ok(utf8_percent_encode(id, SEGMENT).to_string())
}

impl ApiClient {
    pub fn addresses(&self) -> AddressesApi<'_> {
        AddressesApi::new(self)
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn brand_verification(&self) -> BrandVerificationApi<'_> {
        BrandVerificationApi::new(self)
    }

    pub fn buy_requirements(&self) -> BuyRequirementsApi<'_> {
        BuyRequirementsApi::new(self)
    }

    pub fn catalog(&self) -> CatalogApi<'_> {
        CatalogApi::new(self)
    }

    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi::new(self)
    }

    pub fn inquiries(&self) -> InquiriesApi<'_> {
        InquiriesApi::new(self)
    }

    pub fn roles(&self) -> RolesApi<'_> {
        RolesApi::new(self)
    }

    pub fn seller_products(&self) -> SellerProductsApi<'_> {
        SellerProductsApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }
}
