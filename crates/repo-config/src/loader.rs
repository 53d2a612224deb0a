//! Loading of a single configuration file

use serde_json::Value;

use crate::error::{Error, Result};
use crate::extends::{EXTENDS_KEY, is_unset};
use crate::fetcher::{ContentFetcher, FetchResponse, FileLocation};
use crate::file::ConfigFile;
use crate::format::Format;

/// A fetched file with its `_extends` link split off the content
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedFile {
    pub file: ConfigFile,
    /// Raw `_extends` value, if the file links to a parent
    pub extends: Option<Value>,
}

/// Fetch and decode the file at `location`.
///
/// The extension is checked before any fetch. A missing file is not an
/// error: it loads as a [`ConfigFile`] whose `config` is `None`. A null or
/// empty `_extends` value is dropped without producing a link.
pub async fn load_config_file<F>(fetcher: &F, location: &FileLocation) -> Result<LoadedFile>
where
    F: ContentFetcher + ?Sized,
{
    let format = Format::from_path(&location.path)?;
    let url = fetcher.resource_url(location);

    tracing::debug!(
        owner = %location.owner,
        repo = %location.repo,
        path = %location.path,
        git_ref = ?location.git_ref,
        %url,
        "Fetching configuration file"
    );

    let raw = match fetcher.fetch(location).await? {
        FetchResponse::Found(raw) => raw,
        FetchResponse::NotFound => {
            tracing::debug!(%url, "Configuration file not found");
            return Ok(LoadedFile {
                file: ConfigFile::new(location, url, None),
                extends: None,
            });
        }
    };

    if format != Format::Json && raw.is_generic_json() {
        tracing::warn!(%url, "Path is a directory or submodule");
        return Err(Error::AmbiguousPath { url });
    }

    let mut config = format.decode(&url, &raw.bytes)?;
    let extends = config.remove(EXTENDS_KEY).filter(|value| !is_unset(value));

    Ok(LoadedFile {
        file: ConfigFile::new(location, url, Some(config)),
        extends,
    })
}
