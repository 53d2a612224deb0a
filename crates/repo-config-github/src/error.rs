//! Error types for repo-config-github

/// Result type for repo-config-github operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while setting up a [`crate::GithubFetcher`]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid GitHub API url '{url}': {source}")]
    InvalidApiUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Failed to parse fetcher config: {0}")]
    Toml(#[from] toml::de::Error),
}
