//! REST client for the Stockyard backend
//!
//! Thin typed plumbing over the backend's JSON API: a [`RestClient`] that
//! speaks the unified [`shared::ApiResponse`] envelope, per-entity services,
//! the [`OrderCreator`] collaborator trait consumed by the draft controller,
//! and the injectable [`ReferenceCache`] for cross-page lookup data.

mod cache;
mod error;
mod http;
mod services;

pub use cache::ReferenceCache;
pub use error::{ClientError, ClientResult};
pub use http::RestClient;
pub use services::{
    CategoryApi, EntityApi, InventoryApi, OrderApi, OrderCreator, ProductApi, Services,
    SupplierApi, UserApi,
};
