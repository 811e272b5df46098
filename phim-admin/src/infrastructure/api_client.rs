use phim_config::ApiConfig;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{AdminError, Result};
use crate::infrastructure::routes::ApiPath;

/// Thin JSON-over-HTTP client for the catalog API.
///
/// Responses are returned as raw [`Value`]s; turning them into model types is
/// left to `phim_model::payload` so malformed records are reported with a
/// field path.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(AdminError::Client)?;

        debug!(base_url = %config.base_url, "creating catalog API client");

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends the segments of `path` to the base URL, percent-encoding each
    /// one (`/` included). Empty, `.` and `..` segments cannot be addressed
    /// and are rejected.
    pub fn build_url(&self, path: &ApiPath) -> Result<Url> {
        if let Some(bad) = path
            .segments()
            .iter()
            .map(String::as_str)
            .find(|s| matches!(*s, "" | "." | ".."))
        {
            return Err(AdminError::InvalidUrl(format!(
                "path segment `{bad}` in `{path}`"
            )));
        }

        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                AdminError::InvalidUrl(self.base_url.to_string())
            })?;
            segments.pop_if_empty();
            for segment in path.segments() {
                segments.push(segment);
            }
        }
        Ok(url)
    }

    /// `GET` returning the JSON body.
    pub async fn get(
        &self,
        path: &ApiPath,
        query: Option<(&str, &str)>,
    ) -> Result<Value> {
        let url = self.build_url(path)?;
        debug!(%url, "GET");

        let mut request = self.client.get(url.clone());
        if let Some((key, value)) = query {
            request = request.query(&[(key, value)]);
        }
        self.execute(url, request).await
    }

    /// `POST` a JSON body; an empty response body yields `Value::Null`.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &ApiPath,
        body: &B,
    ) -> Result<Value> {
        let url = self.build_url(path)?;
        debug!(%url, "POST");

        let request = self.client.post(url.clone()).json(body);
        self.execute(url, request).await
    }

    /// `PUT` a JSON body. Whatever the backend answers with is ignored.
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &ApiPath,
        body: &B,
    ) -> Result<()> {
        let url = self.build_url(path)?;
        debug!(%url, "PUT");

        let request = self.client.put(url.clone()).json(body);
        self.execute_no_content(url, request).await
    }

    pub async fn delete(&self, path: &ApiPath) -> Result<()> {
        let url = self.build_url(path)?;
        debug!(%url, "DELETE");

        let request = self.client.delete(url.clone());
        self.execute_no_content(url, request).await
    }

    async fn execute(&self, url: Url, request: RequestBuilder) -> Result<Value> {
        let bytes = self.send(&url, request).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|source| AdminError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn execute_no_content(
        &self,
        url: Url,
        request: RequestBuilder,
    ) -> Result<()> {
        self.send(&url, request).await.map(|_| ())
    }

    async fn send(&self, url: &Url, request: RequestBuilder) -> Result<Vec<u8>> {
        let transport = |source| AdminError::Transport {
            url: url.to_string(),
            source,
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;

        if status.is_success() {
            return Ok(body.to_vec());
        }

        let message = rejection_message(&body);
        warn!(
            %url,
            status = status.as_u16(),
            message = message.as_deref().unwrap_or(""),
            "catalog API rejected request"
        );
        Err(AdminError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// `message` field of a JSON error body.
fn rejection_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
