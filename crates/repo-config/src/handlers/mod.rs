//! Format-specific decoders turning raw bytes into a configuration map

pub mod json;
pub mod yaml;
