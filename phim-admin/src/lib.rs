//! Catalog administration library.
//!
//! [`infrastructure`] talks to the catalog API over HTTP behind the
//! [`CatalogApi`] trait. [`domains`] holds the editing logic built on top of
//! it: the draft reducer, episode deduplication and per-row actions, the
//! category/country toggle, the save routine, the paginated movie list and
//! the creation forms.

pub mod domains;
pub mod error;
pub mod infrastructure;
pub mod prelude;

pub use error::{AdminError, Result};
pub use infrastructure::{ApiClient, ApiClientAdapter, CatalogApi};
