pub mod error;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_CONFIG_FILE, DEFAULT_ENV_FILE};
use crate::models::sources::{EnvConfig, FileConfig};
use crate::models::{Config, ConfigSource, RouteConfig};
use crate::util::{non_empty, normalize_segment, parse_timeout};

use error::ConfigLoadError;

/// Values supplied on the command line; they win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub request_timeout: Option<String>,
}

impl ConfigOverrides {
    fn is_empty(&self) -> bool {
        self.base_url.is_none() && self.request_timeout.is_none()
    }
}

/// Result of a load: the effective config. Sources consulted are recorded
/// in `config.metadata`.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
}

/// Layers configuration, lowest precedence first: built-in defaults, TOML
/// file, `.env` file, process environment, command-line overrides.
///
/// Paths set explicitly must exist. Without them the loader looks for
/// `phim.toml` and `.env` in the working directory and skips whichever is
/// absent.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
    discover: bool,
    process_env: bool,
    overrides: ConfigOverrides,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_file: None,
            discover: true,
            process_env: true,
            overrides: ConfigOverrides::default(),
        }
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Do not look for `phim.toml` / `.env` in the working directory.
    pub fn without_discovery(mut self) -> Self {
        self.discover = false;
        self
    }

    /// Ignore the process environment (used by tests).
    pub fn without_process_env(mut self) -> Self {
        self.process_env = false;
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let mut sources = vec![ConfigSource::Defaults];

        let file = match self.resolve(&self.config_path, DEFAULT_CONFIG_FILE) {
            Some(path) => {
                let file = read_file_config(&path)?;
                sources.push(ConfigSource::File(path));
                file
            }
            None => FileConfig::default(),
        };

        let dotenv = match self.resolve(&self.env_file, DEFAULT_ENV_FILE) {
            Some(path) => {
                let env = EnvConfig::from_map(&read_env_file(&path)?);
                sources.push(ConfigSource::EnvFile(path));
                env
            }
            None => EnvConfig::default(),
        };

        let env = if self.process_env {
            let process = EnvConfig::gather();
            if !process.is_empty() {
                sources.push(ConfigSource::Environment);
            }
            process.over(dotenv)
        } else {
            dotenv
        };

        if !self.overrides.is_empty() {
            sources.push(ConfigSource::CommandLine);
        }

        let raw_url = non_empty(self.overrides.base_url.clone())
            .or(env.api_url)
            .or(file.api.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Config::new(parse_base_url(&raw_url)?);

        if let Some(raw) = non_empty(self.overrides.request_timeout.clone())
            .or(env.request_timeout)
            .or(file.api.request_timeout)
        {
            config.api.request_timeout = parse_timeout(&raw).map_err(
                |reason| ConfigLoadError::InvalidTimeout {
                    value: raw.clone(),
                    reason,
                },
            )?;
        }

        let defaults = RouteConfig::default();
        config.routes = RouteConfig {
            movies: route(
                "movies",
                env.movies_path.or(file.routes.movies),
                defaults.movies,
            )?,
            movies_list: route(
                "movies_list",
                env.movies_list_path.or(file.routes.movies_list),
                defaults.movies_list,
            )?,
            categories: route(
                "categories",
                env.categories_path.or(file.routes.categories),
                defaults.categories,
            )?,
            countries: route(
                "countries",
                env.countries_path.or(file.routes.countries),
                defaults.countries,
            )?,
            episodes_root: route(
                "episodes_root",
                env.episodes_root.or(file.routes.episodes_root),
                defaults.episodes_root,
            )?,
        };
        config.metadata.sources = sources;

        debug!(
            base_url = %config.api.base_url,
            timeout = ?config.api.request_timeout,
            sources = ?config.metadata.sources,
            "configuration loaded"
        );

        Ok(ConfigLoad { config })
    }

    fn resolve(
        &self,
        explicit: &Option<PathBuf>,
        default_name: &str,
    ) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.clone());
        }
        if !self.discover {
            return None;
        }
        let candidate = PathBuf::from(default_name);
        candidate.is_file().then_some(candidate)
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| {
        ConfigLoadError::FileIo {
            path: path.to_path_buf(),
            source,
        }
    })?;
    toml::from_str(&raw).map_err(|source| ConfigLoadError::FileParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads `KEY=VALUE` pairs without touching the process environment.
fn read_env_file(
    path: &Path,
) -> Result<HashMap<String, String>, ConfigLoadError> {
    let mut map = HashMap::new();
    for item in dotenvy::from_path_iter(path)? {
        let (key, value) = item?;
        map.insert(key, value);
    }
    Ok(map)
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigLoadError> {
    let url = Url::parse(raw.trim()).map_err(|source| {
        ConfigLoadError::InvalidBaseUrl {
            value: raw.to_string(),
            source,
        }
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigLoadError::UnsupportedScheme {
            value: raw.to_string(),
        }),
    }
}

fn route(
    name: &'static str,
    configured: Option<String>,
    default: String,
) -> Result<String, ConfigLoadError> {
    match configured {
        None => Ok(default),
        Some(raw) => {
            let segment = normalize_segment(&raw);
            if segment.is_empty() {
                Err(ConfigLoadError::EmptyRoute { name })
            } else {
                Ok(segment)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_loader_yields_defaults() {
        let load = ConfigLoader::new()
            .without_discovery()
            .without_process_env()
            .load()
            .unwrap();

        assert_eq!(load.config.api.base_url.as_str(), "http://localhost:8080/");
        assert_eq!(load.config.routes, RouteConfig::default());
        assert_eq!(load.config.metadata.sources, vec![ConfigSource::Defaults]);
    }

    #[test]
    fn overrides_are_validated() {
        let err = ConfigLoader::new()
            .without_discovery()
            .without_process_env()
            .with_overrides(ConfigOverrides {
                base_url: Some("ftp://catalog".into()),
                request_timeout: None,
            })
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedScheme { .. }));
    }

    #[test]
    fn route_rejects_slash_only_values() {
        let err = route("movies", Some("//".into()), "x".into()).unwrap_err();
        assert!(matches!(err, ConfigLoadError::EmptyRoute { name: "movies" }));
    }
}
