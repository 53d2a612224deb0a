//! Resolution request options

use std::fmt;
use std::sync::Arc;

use crate::fetcher::FileLocation;
use crate::file::Configuration;
use crate::merge::{Defaults, MergeStrategy};

/// Directory that legacy `filename` requests resolve into
pub const LEGACY_CONFIG_DIR: &str = ".github";

/// What to resolve and how to combine the results
#[derive(Clone)]
pub struct ConfigRequest {
    pub owner: String,
    pub repo: String,
    pub path: String,
    /// Ref for the requested file only; fallback and `_extends` lookups use
    /// the default branch
    pub git_ref: Option<String>,
    pub defaults: Defaults,
    /// Replaces the default shallow merge
    pub merge: Option<Arc<dyn MergeStrategy>>,
}

impl ConfigRequest {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            path: path.into(),
            git_ref: None,
            defaults: Defaults::default(),
            merge: None,
        }
    }

    /// Legacy form naming a file inside the `.github/` directory
    pub fn from_filename(
        owner: impl Into<String>,
        repo: impl Into<String>,
        filename: &str,
    ) -> Self {
        Self::new(owner, repo, format!("{LEGACY_CONFIG_DIR}/{filename}"))
    }

    pub fn with_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = Some(git_ref.into());
        self
    }

    pub fn with_branch(self, branch: impl Into<String>) -> Self {
        self.with_ref(branch)
    }

    pub fn with_defaults(mut self, defaults: Configuration) -> Self {
        self.defaults = Defaults::Map(defaults);
        self
    }

    /// Compute the final configuration from the chain configs, lowest
    /// precedence first, instead of merging
    pub fn with_defaults_fn<F>(mut self, compute: F) -> Self
    where
        F: Fn(&[Configuration]) -> Configuration + Send + Sync + 'static,
    {
        self.defaults = Defaults::Function(Arc::new(compute));
        self
    }

    pub fn with_merge<M>(mut self, strategy: M) -> Self
    where
        M: MergeStrategy + 'static,
    {
        self.merge = Some(Arc::new(strategy));
        self
    }

    /// Location of the requested file
    pub fn location(&self) -> FileLocation {
        FileLocation::new(&self.owner, &self.repo, &self.path).with_ref(self.git_ref.clone())
    }
}

impl fmt::Debug for ConfigRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigRequest")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("path", &self.path)
            .field("git_ref", &self.git_ref)
            .field("defaults", &self.defaults)
            .field("merge", &self.merge.as_ref().map(|_| ".."))
            .finish()
    }
}
