use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    FileParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid API base URL '{value}'")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API base URL '{value}' must use http or https")]
    UnsupportedScheme { value: String },
    #[error("invalid request timeout '{value}': {reason}")]
    InvalidTimeout { value: String, reason: String },
    #[error("route `{name}` cannot be empty")]
    EmptyRoute { name: &'static str },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}
