//! Top-level configuration resolution

use serde::Serialize;

use crate::chain::ChainResolver;
use crate::error::Result;
use crate::fetcher::{ContentFetcher, FileLocation};
use crate::file::{ConfigFile, Configuration};
use crate::merge::merge_chain;
use crate::request::ConfigRequest;

/// The effective configuration and the files it was built from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    /// Defaults merged with every loaded file; never contains `_extends`
    pub config: Configuration,
    /// Every file visited, requested file first; absent files included
    pub files: Vec<ConfigFile>,
}

/// Resolve the effective configuration for `request`.
///
/// # Errors
///
/// Any error aborts the resolution: unsupported extensions, directory
/// paths, malformed content, invalid or cyclic `_extends` links, and
/// non-404 fetch failures. Missing files are recorded in `files` with a
/// `None` config instead.
///
/// # Example
///
/// ```ignore
/// use repo_config::{ConfigRequest, resolve_config};
///
/// let request = ConfigRequest::new("octocat", "hello-world", ".github/my-app.yml");
/// let resolved = resolve_config(&fetcher, request).await?;
/// println!("{}", serde_json::to_string_pretty(&resolved.config)?);
/// ```
pub async fn resolve_config<F>(fetcher: &F, request: ConfigRequest) -> Result<ResolvedConfig>
where
    F: ContentFetcher + ?Sized,
{
    let chain = ChainResolver::new(fetcher).resolve(request.location()).await?;
    let config = merge_chain(&request.defaults, request.merge.as_deref(), &chain);

    tracing::debug!(
        owner = %request.owner,
        repo = %request.repo,
        path = %request.path,
        files = chain.len(),
        keys = config.len(),
        "Resolved configuration"
    );

    Ok(ResolvedConfig {
        config,
        files: chain.into_files(),
    })
}

/// Resolution facade bound to one fetcher
#[derive(Debug, Clone)]
pub struct ConfigClient<F> {
    fetcher: F,
}

impl<F: ContentFetcher> ConfigClient<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// See [`resolve_config`]
    pub async fn get(&self, request: ConfigRequest) -> Result<ResolvedConfig> {
        resolve_config(&self.fetcher, request).await
    }

    /// Load the file chain for `location` without merging
    pub async fn files(&self, location: FileLocation) -> Result<Vec<ConfigFile>> {
        let chain = ChainResolver::new(&self.fetcher).resolve(location).await?;
        Ok(chain.into_files())
    }
}
