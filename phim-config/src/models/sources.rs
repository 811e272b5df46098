use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ENV_API_URL, ENV_CATEGORIES_PATH, ENV_COUNTRIES_PATH, ENV_EPISODES_ROOT,
    ENV_MOVIES_LIST_PATH, ENV_MOVIES_PATH, ENV_REQUEST_TIMEOUT,
};
use crate::util::non_empty;

/// Raw configuration as defined in a TOML file.
///
/// ```toml
/// [api]
/// base_url = "http://localhost:8080"
/// request_timeout = "30s"
///
/// [routes]
/// movies = "danh-sach/phim"
/// ```
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub api: FileApiConfig,
    #[serde(default)]
    pub routes: FileRouteConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileRouteConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movies_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episodes_root: Option<String>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub api_url: Option<String>,
    pub request_timeout: Option<String>,
    pub movies_path: Option<String>,
    pub movies_list_path: Option<String>,
    pub categories_path: Option<String>,
    pub countries_path: Option<String>,
    pub episodes_root: Option<String>,
}

impl EnvConfig {
    /// Reads the process environment.
    pub fn gather() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads values through `lookup`, so `.env` maps and tests can stand in
    /// for the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: non_empty(lookup(ENV_API_URL)),
            request_timeout: non_empty(lookup(ENV_REQUEST_TIMEOUT)),
            movies_path: non_empty(lookup(ENV_MOVIES_PATH)),
            movies_list_path: non_empty(lookup(ENV_MOVIES_LIST_PATH)),
            categories_path: non_empty(lookup(ENV_CATEGORIES_PATH)),
            countries_path: non_empty(lookup(ENV_COUNTRIES_PATH)),
            episodes_root: non_empty(lookup(ENV_EPISODES_ROOT)),
        }
    }

    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self::from_lookup(|key| map.get(key).cloned())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Values set here win over `lower`.
    pub fn over(self, lower: EnvConfig) -> EnvConfig {
        EnvConfig {
            api_url: self.api_url.or(lower.api_url),
            request_timeout: self.request_timeout.or(lower.request_timeout),
            movies_path: self.movies_path.or(lower.movies_path),
            movies_list_path: self.movies_list_path.or(lower.movies_list_path),
            categories_path: self.categories_path.or(lower.categories_path),
            countries_path: self.countries_path.or(lower.countries_path),
            episodes_root: self.episodes_root.or(lower.episodes_root),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_values_shadow_env_file_values() {
        let file = EnvConfig {
            api_url: Some("http://file".into()),
            movies_path: Some("from-file".into()),
            ..EnvConfig::default()
        };
        let process = EnvConfig {
            api_url: Some("http://process".into()),
            ..EnvConfig::default()
        };

        let merged = process.over(file);
        assert_eq!(merged.api_url.as_deref(), Some("http://process"));
        assert_eq!(merged.movies_path.as_deref(), Some("from-file"));
    }

    #[test]
    fn lookup_ignores_blank_values() {
        let env = EnvConfig::from_lookup(|key| {
            (key == ENV_API_URL).then(|| "   ".to_string())
        });
        assert!(env.is_empty());
    }
}
