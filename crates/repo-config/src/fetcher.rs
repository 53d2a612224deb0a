//! Boundary to the service that retrieves raw repository content
//!
//! The resolver never talks to a network itself. It asks a [`ContentFetcher`]
//! for the raw bytes of `(owner, repo, path, ref)` and interprets the answer.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::error::FetchError;

/// Base url of the public GitHub REST API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Media type requesting unrendered file content
pub const RAW_MEDIA_TYPE: &str = "application/vnd.github.v3.raw";

/// Where a configuration file lives
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileLocation {
    pub owner: String,
    pub repo: String,
    pub path: String,
    /// Branch, tag or commit; `None` targets the default branch
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
}

impl FileLocation {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            path: path.into(),
            git_ref: None,
        }
    }

    pub fn with_ref(mut self, git_ref: Option<String>) -> Self {
        self.git_ref = git_ref;
        self
    }

    /// Whether both locations name the same file, ignoring the ref
    pub fn same_file(&self, other: &FileLocation) -> bool {
        self.owner == other.owner && self.repo == other.repo && self.path == other.path
    }

    /// Render the "get repository content" url for this location.
    ///
    /// The file path is encoded as a single segment, so `/` becomes `%2F`.
    /// A ref is appended as the `ref` query parameter.
    pub fn contents_url(&self, api_url: &Url) -> Url {
        let mut url = api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repo.as_str(), "contents"])
                .push(&self.path);
        }
        if let Some(git_ref) = &self.git_ref {
            url.query_pairs_mut().append_pair("ref", git_ref);
        }
        url
    }
}

/// Raw file content as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContent {
    pub bytes: Vec<u8>,
    /// Value of the `Content-Type` response header
    pub content_type: Option<String>,
}

impl RawContent {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Whether the backend answered with a generic JSON document.
    ///
    /// A raw-content request for a directory or submodule yields a JSON
    /// listing instead of file bytes.
    pub fn is_generic_json(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|value| value.split(';').next())
            .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
    }
}

/// Outcome of a successful fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResponse {
    Found(RawContent),
    /// The backend reported 404
    NotFound,
}

/// Retrieves raw file content for a location.
///
/// Implementations negotiate for unrendered content so bytes map 1:1 to the
/// file. Timeouts and cancellation belong to the implementation and surface
/// as a [`FetchError`] without a status.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Canonical url describing `location`, used in results and error messages
    fn resource_url(&self, location: &FileLocation) -> String;

    async fn fetch(&self, location: &FileLocation) -> Result<FetchResponse, FetchError>;
}

#[async_trait]
impl<T: ContentFetcher + ?Sized> ContentFetcher for Arc<T> {
    fn resource_url(&self, location: &FileLocation) -> String {
        (**self).resource_url(location)
    }

    async fn fetch(&self, location: &FileLocation) -> Result<FetchResponse, FetchError> {
        (**self).fetch(location).await
    }
}
