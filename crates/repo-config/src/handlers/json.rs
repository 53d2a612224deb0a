//! JSON decoder

use serde_json::Value;

use crate::Configuration;
use crate::error::{Error, Result};

/// Decode `bytes` as a JSON object.
///
/// Anything other than a top-level object is rejected, including bare
/// strings, numbers and arrays.
pub fn decode(url: &str, bytes: &[u8]) -> Result<Configuration> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => {
            tracing::trace!(%url, keys = map.len(), "Decoded JSON configuration");
            Ok(map)
        }
        Ok(_) => Err(Error::InvalidJson {
            url: url.to_string(),
            source: None,
        }),
        Err(source) => Err(Error::InvalidJson {
            url: url.to_string(),
            source: Some(source),
        }),
    }
}
