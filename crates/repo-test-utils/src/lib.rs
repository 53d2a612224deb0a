//! Shared test utilities for the repo-config workspace.
//!
//! This crate provides a scripted in-memory content fetcher so resolution
//! tests never touch the network. It is a dev-dependency only, never
//! published.
//!
//! # Modules
//!
//! - [`fetcher`] — [`MockFetcher`], routes keyed by resource url

pub mod fetcher;

pub use fetcher::MockFetcher;
