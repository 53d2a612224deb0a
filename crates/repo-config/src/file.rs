//! Loaded configuration files

use serde::Serialize;
use serde_json::{Map, Value};

use crate::fetcher::FileLocation;

/// A configuration object: string keys mapped to arbitrary JSON values
pub type Configuration = Map<String, Value>;

/// One file of a resolution chain.
///
/// `config` is `None` when the file does not exist, which is distinct from
/// an existing but empty file (`Some` of an empty map).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigFile {
    pub owner: String,
    pub repo: String,
    pub path: String,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    /// Resource url the file was fetched from
    pub url: String,
    /// Parsed content without the `_extends` key
    pub config: Option<Configuration>,
}

impl ConfigFile {
    pub fn new(location: &FileLocation, url: impl Into<String>, config: Option<Configuration>) -> Self {
        Self {
            owner: location.owner.clone(),
            repo: location.repo.clone(),
            path: location.path.clone(),
            git_ref: location.git_ref.clone(),
            url: url.into(),
            config,
        }
    }

    pub fn exists(&self) -> bool {
        self.config.is_some()
    }

    pub fn location(&self) -> FileLocation {
        FileLocation::new(&self.owner, &self.repo, &self.path).with_ref(self.git_ref.clone())
    }

    /// Whether this file has the same (owner, repo, path) identity as `location`
    pub fn is_same_file(&self, location: &FileLocation) -> bool {
        self.owner == location.owner && self.repo == location.repo && self.path == location.path
    }
}
