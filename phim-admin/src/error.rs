use phim_model::{PayloadError, ValidationError};
use thiserror::Error;

/// Failures of catalog operations.
///
/// Every variant abandons the operation; callers never see a partially
/// applied change.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(
        "request rejected with status {status}{}",
        .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
    )]
    Rejected {
        status: u16,
        /// `message` field of the error body, when the backend sent one.
        message: Option<String>,
    },

    #[error("response from {url} is not valid JSON")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected response payload: {0}")]
    Payload(#[from] PayloadError),

    #[error("{entity} has no identifier yet")]
    MissingIdentifier { entity: &'static str },

    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}

impl AdminError {
    /// Text to show an operator: the backend's own message when it sent one,
    /// otherwise `fallback`.
    pub fn operator_message(&self, fallback: &str) -> String {
        match self {
            AdminError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            AdminError::Validation(err) => err.to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AdminError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;
