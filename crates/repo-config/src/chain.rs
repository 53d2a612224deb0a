//! Resolution of the chain of files behind one request
//!
//! The chain starts with the requested file. If that file is missing, the
//! same path is looked up once in the owner's `.github` repository. From the
//! last loaded file, `_extends` links are followed one at a time until a
//! file without a link (or a missing file) ends the chain.

use crate::error::{Error, Result};
use crate::extends::ExtendReference;
use crate::fetcher::{ContentFetcher, FileLocation};
use crate::file::{ConfigFile, Configuration};
use crate::loader::load_config_file;

/// Repository consulted when the requested file does not exist
pub const FALLBACK_REPO: &str = ".github";

/// Ordered files loaded for one request; index 0 is the requested file.
///
/// No two entries share an (owner, repo, path) identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionChain {
    files: Vec<ConfigFile>,
}

impl ResolutionChain {
    pub fn files(&self) -> &[ConfigFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Existing configs, lowest precedence first.
    ///
    /// The furthest ancestor comes first and the requested file last, so
    /// folding left to right lets nearer files win.
    pub fn configs(&self) -> Vec<Configuration> {
        self.files
            .iter()
            .rev()
            .filter_map(|file| file.config.clone())
            .collect()
    }

    /// Entry already loaded for the same file as `location`
    pub fn find_loaded(&self, location: &FileLocation) -> Option<&ConfigFile> {
        self.files.iter().find(|file| file.is_same_file(location))
    }

    pub fn into_files(self) -> Vec<ConfigFile> {
        self.files
    }

    fn push(&mut self, file: ConfigFile) {
        self.files.push(file);
    }
}

/// Walks fallback and `_extends` links for a requested file
pub struct ChainResolver<'a, F: ?Sized> {
    fetcher: &'a F,
}

impl<'a, F> ChainResolver<'a, F>
where
    F: ContentFetcher + ?Sized,
{
    pub fn new(fetcher: &'a F) -> Self {
        Self { fetcher }
    }

    /// Load the chain of files starting at `requested`.
    ///
    /// Fetches run strictly one after another since each file decides what
    /// to load next. A link to a file already in the chain fails with
    /// [`Error::RecursionDetected`] before that file is fetched again.
    pub async fn resolve(&self, requested: FileLocation) -> Result<ResolutionChain> {
        let mut chain = ResolutionChain::default();

        let primary = load_config_file(self.fetcher, &requested).await?;
        let mut current = if primary.file.exists() || requested.repo == FALLBACK_REPO {
            primary
        } else {
            chain.push(primary.file);
            let fallback = FileLocation::new(&requested.owner, FALLBACK_REPO, &requested.path);
            tracing::debug!(
                owner = %fallback.owner,
                path = %fallback.path,
                "Requested file missing, trying fallback repository"
            );
            load_config_file(self.fetcher, &fallback).await?
        };

        loop {
            let Some(extends) = current.extends.take() else {
                chain.push(current.file);
                return Ok(chain);
            };

            let reference =
                ExtendReference::parse(&extends, &current.file.location(), &current.file.url)?;
            let target = reference.location();
            let referrer_url = current.file.url.clone();
            chain.push(current.file);

            if let Some(loaded) = chain.find_loaded(&target) {
                tracing::warn!(
                    extends = %reference.value,
                    url = %referrer_url,
                    loaded_url = %loaded.url,
                    "Recursion detected in _extends chain"
                );
                return Err(Error::RecursionDetected {
                    extends: reference.value,
                    url: referrer_url,
                    loaded_url: loaded.url.clone(),
                });
            }

            tracing::debug!(
                extends = %reference.value,
                owner = %target.owner,
                repo = %target.repo,
                path = %target.path,
                "Following _extends"
            );
            current = load_config_file(self.fetcher, &target).await?;
        }
    }
}
