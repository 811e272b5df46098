pub mod sources;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::constants::{
    DEFAULT_CATEGORIES_PATH, DEFAULT_COUNTRIES_PATH, DEFAULT_EPISODES_ROOT,
    DEFAULT_MOVIES_LIST_PATH, DEFAULT_MOVIES_PATH,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Effective client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub routes: RouteConfig,
    pub metadata: ConfigMetadata,
}

impl Config {
    /// Defaults for everything except the backend location.
    pub fn new(base_url: Url) -> Self {
        Self {
            api: ApiConfig {
                base_url,
                request_timeout: Duration::from_secs(
                    DEFAULT_REQUEST_TIMEOUT_SECS,
                ),
            },
            routes: RouteConfig::default(),
            metadata: ConfigMetadata::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: Url,
    pub request_timeout: Duration,
}

/// Path segments of the catalog API, relative to the base URL and stored
/// without leading or trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    /// `GET {movies}/{slug}`, `PUT|DELETE {movies}/{id}`, `POST {movies}`
    pub movies: String,
    /// `GET {movies_list}?page=N`
    pub movies_list: String,
    pub categories: String,
    pub countries: String,
    /// `{episodes_root}/{movieId}/episodes`
    pub episodes_root: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            movies: DEFAULT_MOVIES_PATH.to_string(),
            movies_list: DEFAULT_MOVIES_LIST_PATH.to_string(),
            categories: DEFAULT_CATEGORIES_PATH.to_string(),
            countries: DEFAULT_COUNTRIES_PATH.to_string(),
            episodes_root: DEFAULT_EPISODES_ROOT.to_string(),
        }
    }
}

/// Where the effective values came from, lowest precedence first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMetadata {
    pub sources: Vec<ConfigSource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
    EnvFile(PathBuf),
    Environment,
    CommandLine,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Defaults => f.write_str("defaults"),
            ConfigSource::File(path) => write!(f, "file {}", path.display()),
            ConfigSource::EnvFile(path) => {
                write!(f, "env file {}", path.display())
            }
            ConfigSource::Environment => f.write_str("environment"),
            ConfigSource::CommandLine => f.write_str("command line"),
        }
    }
}
