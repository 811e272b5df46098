//! HTTP transport, service seam and test doubles for the catalog API.

pub mod adapters;
pub mod api_client;
pub mod routes;
pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use adapters::ApiClientAdapter;
pub use api_client::ApiClient;
pub use services::CatalogApi;
