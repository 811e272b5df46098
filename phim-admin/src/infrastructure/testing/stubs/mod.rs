pub mod api;

pub use api::{ApiCall, Operation, TestCatalogApi};
