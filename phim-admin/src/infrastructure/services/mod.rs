pub mod api;

pub use api::CatalogApi;
