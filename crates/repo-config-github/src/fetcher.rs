//! [`ContentFetcher`] backed by the GitHub "get repository content" endpoint

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use repo_config::{ContentFetcher, FetchError, FetchResponse, FileLocation, RAW_MEDIA_TYPE, RawContent};
use serde::Deserialize;
use url::Url;

use crate::config::GithubConfig;
use crate::error::{Error, Result};

/// Error body returned by the GitHub API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Fetches raw file content over HTTPS.
///
/// Requests the raw media type so the response body is the file itself. A
/// 404 is reported as [`FetchResponse::NotFound`]; every other non-success
/// status becomes a [`FetchError`] carrying that status.
#[derive(Debug, Clone)]
pub struct GithubFetcher {
    config: GithubConfig,
    api_url: Url,
    client: Client,
}

impl GithubFetcher {
    /// # Errors
    ///
    /// Returns [`Error::InvalidApiUrl`] for an unparsable `api_url` and
    /// [`Error::Client`] when the HTTP client cannot be built.
    pub fn new(config: GithubConfig) -> Result<Self> {
        let api_url = Url::parse(&config.api_url).map_err(|source| Error::InvalidApiUrl {
            url: config.api_url.clone(),
            source,
        })?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            config,
            api_url,
            client,
        })
    }

    pub fn config(&self) -> &GithubConfig {
        &self.config
    }
}

#[async_trait]
impl ContentFetcher for GithubFetcher {
    fn resource_url(&self, location: &FileLocation) -> String {
        location.contents_url(&self.api_url).to_string()
    }

    async fn fetch(&self, location: &FileLocation) -> std::result::Result<FetchResponse, FetchError> {
        let url = location.contents_url(&self.api_url);
        tracing::debug!(url = %url, "GET repository content");

        let mut request = self.client.get(url.clone()).header(ACCEPT, RAW_MEDIA_TYPE);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| FetchError::transport(err.to_string()))?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(FetchResponse::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(url = %url, status = status.as_u16(), "Content request failed");
            return Err(FetchError::with_status(
                status.as_u16(),
                error_message(status, &body),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|err| FetchError::transport(err.to_string()))?;

        let mut raw = RawContent::new(bytes.to_vec());
        if let Some(content_type) = content_type {
            raw = raw.with_content_type(content_type);
        }
        Ok(FetchResponse::Found(raw))
    }
}

/// The API's `message` field when present, else the body or status text
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        return parsed.message;
    }
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}
