//! Test doubles for the catalog service.
//!
//! Compiled for unit tests and behind the `testing` feature so integration
//! tests and downstream crates can drive the domain logic without a server.

pub mod stubs;

pub use stubs::{ApiCall, Operation, TestCatalogApi};
