//! GitHub REST content fetcher for repo-config
//!
//! ```ignore
//! use repo_config::{ConfigClient, ConfigRequest};
//! use repo_config_github::{GithubConfig, GithubFetcher};
//!
//! let client = ConfigClient::new(GithubFetcher::new(GithubConfig::from_env())?);
//! let resolved = client
//!     .get(ConfigRequest::new("octocat", "hello-world", ".github/my-app.yml"))
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod fetcher;

pub use config::{API_URL_ENV, GithubConfig, TOKEN_ENV};
pub use error::{Error, Result};
pub use fetcher::GithubFetcher;
