//! Parsing of `_extends` references
//!
//! An `_extends` value names the next file of a chain using the grammar
//! `[ORG/]PROJECT[:FILEPATH]`:
//!
//! - `ORG` is a repository owner: ASCII alphanumerics and single inner
//!   hyphens, at most 39 characters. Defaults to the referring file's owner.
//! - `PROJECT` is a repository name made of ASCII alphanumerics, `-`, `_`
//!   and `.`.
//! - `FILEPATH` must end in `.yml` or `.yaml`. Defaults to the referring
//!   file's path. JSON files cannot be named explicitly.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::fetcher::FileLocation;

/// Reserved configuration key linking a file to its parent
pub const EXTENDS_KEY: &str = "_extends";

const MAX_OWNER_LEN: usize = 39;

static EXTENDS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:([A-Za-z0-9]+(?:-[A-Za-z0-9]+)*)/)?",
        r"([-_.A-Za-z0-9]+)",
        r"(?::([-_./A-Za-z0-9]+\.[Yy][Aa]?[Mm][Ll]))?$",
    ))
    .unwrap()
});

/// Fully qualified target of an `_extends` value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtendReference {
    pub owner: String,
    pub repo: String,
    pub path: String,
    /// The literal value this reference was parsed from
    pub value: String,
}

impl ExtendReference {
    /// Parse an `_extends` value found in the file at `referrer`.
    ///
    /// `url` is the referring file's url and only appears in error messages.
    pub fn parse(value: &Value, referrer: &FileLocation, url: &str) -> Result<Self> {
        let invalid = || Error::InvalidExtendsValue {
            value: value.to_string(),
            url: url.to_string(),
        };

        let text = value.as_str().ok_or_else(invalid)?;
        let captures = EXTENDS_PATTERN.captures(text).ok_or_else(invalid)?;

        let owner = captures.get(1).map(|m| m.as_str());
        if owner.is_some_and(|owner| owner.len() > MAX_OWNER_LEN) {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.unwrap_or(&referrer.owner).to_string(),
            repo: captures[2].to_string(),
            path: captures
                .get(3)
                .map_or(referrer.path.as_str(), |m| m.as_str())
                .to_string(),
            value: text.to_string(),
        })
    }

    /// Location of the referenced file; links always target the default branch
    pub fn location(&self) -> FileLocation {
        FileLocation::new(&self.owner, &self.repo, &self.path)
    }
}

/// Whether an `_extends` value means "no link"
pub(crate) fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
