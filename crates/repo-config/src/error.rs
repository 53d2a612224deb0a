//! Error types for repo-config

/// Prefix carried by every error message raised by this crate
pub const ERROR_PREFIX: &str = "[repo-config]";

/// Result type for repo-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a content fetcher for anything other than a missing file.
///
/// `status` is the HTTP status when the backend answered, or `None` for
/// transport failures, timeouts and cancellation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    pub status: Option<u16>,
    pub message: String,
}

impl FetchError {
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

/// Errors that abort a configuration resolution
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Requested path does not end in `.json`, `.yml` or `.yaml`
    #[error(
        "[repo-config] .{extension} extension is not supported for configuration (path: \"{path}\")"
    )]
    UnsupportedExtension { extension: String, path: String },

    /// Path resolved to a directory or a git submodule
    #[error("[repo-config] {url} exists, but is either a directory or a submodule")]
    AmbiguousPath { url: String },

    #[error("[repo-config] Configuration could not be parsed from {url} (invalid JSON)")]
    InvalidJson {
        url: String,
        source: Option<serde_json::Error>,
    },

    #[error("[repo-config] Configuration could not be parsed from {url} (invalid YAML)")]
    InvalidYaml {
        url: String,
        source: serde_yaml::Error,
    },

    /// YAML document uses an explicit tag such as `!js/function`
    #[error("[repo-config] Configuration could not be parsed from {url} (unsafe YAML: tag {tag})")]
    UnsafeYaml { url: String, tag: String },

    #[error("[repo-config] Configuration could not be parsed from {url} (YAML is not an object)")]
    YamlNotAnObject { url: String },

    /// `value` is the offending `_extends` value rendered as JSON
    #[error("[repo-config] Invalid value {value} for _extends in {url}")]
    InvalidExtendsValue { value: String, url: String },

    #[error(
        "[repo-config] Recursion detected. Ignoring \"_extends: {extends}\" from {url} because {loaded_url} was already loaded."
    )]
    RecursionDetected {
        extends: String,
        url: String,
        loaded_url: String,
    },

    /// Non-404 failure from the content fetcher, passed through verbatim
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl Error {
    /// HTTP status of a passed-through fetch failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Fetch(err) => err.status,
            _ => None,
        }
    }
}
