//! Configuration library for the phim admin client.
//!
//! Centralizes the defaults for the catalog API location and route layout,
//! and layers a TOML file, a `.env` file, the process environment and
//! command-line overrides on top of them. Both the `phim-admin` library and
//! the `phimctl` binary consume the resulting [`Config`].

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;

pub use loader::{ConfigLoad, ConfigLoader, ConfigOverrides, error::ConfigLoadError};
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{ApiConfig, Config, ConfigMetadata, ConfigSource, RouteConfig};
