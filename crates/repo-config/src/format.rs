//! Format detection from file extensions

use serde::Serialize;

use crate::Configuration;
use crate::error::{Error, Result};
use crate::handlers;

/// Extensions accepted for configuration files
pub const SUPPORTED_EXTENSIONS: &[&str] = &["json", "yml", "yaml"];

/// Supported configuration formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Detect format from the text after the last `.` of `path`.
    ///
    /// A path without a dot is treated as if the whole path were the
    /// extension, which is never supported.
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = path.rsplit('.').next().unwrap_or(path).to_lowercase();
        Self::from_extension(&extension).ok_or_else(|| Error::UnsupportedExtension {
            extension,
            path: path.to_string(),
        })
    }

    /// Get default file extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Yaml => &["yaml", "yml"],
        }
    }

    /// Decode raw file bytes fetched from `url` into a configuration map
    pub fn decode(&self, url: &str, bytes: &[u8]) -> Result<Configuration> {
        match self {
            Self::Json => handlers::json::decode(url, bytes),
            Self::Yaml => handlers::yaml::decode(url, bytes),
        }
    }
}
