//! Cross-repository configuration resolution
//!
//! Resolves the effective configuration file of a repository by walking an
//! inheritance chain:
//!
//! 1. The requested file at `owner/repo/path` (optionally at a ref).
//! 2. If it is missing, the same path in the owner's `.github` repository.
//! 3. Every file named by an `_extends` key, until a file has none.
//!
//! The configs found along the way are merged over caller defaults, nearest
//! file first in precedence. Content retrieval is delegated to a
//! [`ContentFetcher`]; YAML and JSON files are supported.
//!
//! # Example
//!
//! ```ignore
//! use repo_config::{ConfigClient, ConfigRequest};
//!
//! let client = ConfigClient::new(fetcher);
//! let resolved = client
//!     .get(ConfigRequest::new("octocat", "hello-world", ".github/my-app.yml"))
//!     .await?;
//! for file in &resolved.files {
//!     println!("{} exists: {}", file.url, file.exists());
//! }
//! ```

pub mod chain;
pub mod error;
pub mod extends;
pub mod fetcher;
pub mod file;
pub mod format;
pub mod handlers;
pub mod loader;
pub mod logging;
pub mod merge;
pub mod request;
pub mod resolve;

pub use chain::{ChainResolver, FALLBACK_REPO, ResolutionChain};
pub use error::{ERROR_PREFIX, Error, FetchError, Result};
pub use extends::{EXTENDS_KEY, ExtendReference};
pub use fetcher::{
    ContentFetcher, DEFAULT_API_URL, FetchResponse, FileLocation, RAW_MEDIA_TYPE, RawContent,
};
pub use file::{ConfigFile, Configuration};
pub use format::{Format, SUPPORTED_EXTENSIONS};
pub use loader::{LoadedFile, load_config_file};
pub use merge::{DeepMerge, Defaults, MergeStrategy, ShallowMerge};
pub use request::ConfigRequest;
pub use resolve::{ConfigClient, ResolvedConfig, resolve_config};
