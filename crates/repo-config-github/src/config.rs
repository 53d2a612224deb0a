//! Settings for the GitHub content fetcher

use repo_config::DEFAULT_API_URL;
use serde::Deserialize;

use crate::error::Result;

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable overriding the API base url, for GitHub Enterprise
pub const API_URL_ENV: &str = "GITHUB_API_URL";

/// Connection settings for [`crate::GithubFetcher`].
///
/// Every field is optional in TOML:
///
/// ```toml
/// api_url = "https://github.example.com/api/v3"
/// token = "ghp_..."
/// timeout_ms = 5000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api_url: String,
    /// Sent as a bearer token when set
    pub token: Option<String>,
    pub user_agent: String,
    /// Applies to the whole request, body included
    pub timeout_ms: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            user_agent: concat!("repo-config/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl GithubConfig {
    /// Defaults overridden by `GITHUB_TOKEN` and `GITHUB_API_URL`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(token) = lookup(TOKEN_ENV).filter(|value| !value.is_empty()) {
            config.token = Some(token);
        }
        if let Some(api_url) = lookup(API_URL_ENV).filter(|value| !value.is_empty()) {
            config.api_url = api_url;
        }
        config
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}
