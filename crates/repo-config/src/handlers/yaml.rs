//! YAML decoder using serde_yaml
//!
//! Documents are parsed into `serde_yaml::Value` and converted to JSON
//! values. Explicit tags are never materialized: a tagged node anywhere in
//! the tree rejects the whole document as unsafe.

use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;

use crate::Configuration;
use crate::error::{Error, Result};

/// Decode `bytes` as a YAML mapping.
///
/// Empty and null documents decode to an empty map.
pub fn decode(url: &str, bytes: &[u8]) -> Result<Configuration> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    let value: YamlValue = serde_yaml::from_slice(bytes).map_err(|source| Error::InvalidYaml {
        url: url.to_string(),
        source,
    })?;

    if let Some(tag) = find_tag(&value) {
        tracing::warn!(%url, %tag, "Refusing tagged YAML node");
        return Err(Error::UnsafeYaml {
            url: url.to_string(),
            tag,
        });
    }

    let not_an_object = || Error::YamlNotAnObject {
        url: url.to_string(),
    };

    match value {
        YamlValue::Null => Ok(Map::new()),
        YamlValue::Mapping(mapping) => {
            let mut config = Map::new();
            for (key, value) in &mapping {
                let key = mapping_key(key).ok_or_else(not_an_object)?;
                config.insert(key, yaml_to_json(value));
            }
            tracing::trace!(%url, keys = config.len(), "Decoded YAML configuration");
            Ok(config)
        }
        _ => Err(not_an_object()),
    }
}

/// First explicit tag found in a depth-first walk
fn find_tag(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::Tagged(tagged) => Some(tagged.tag.to_string()),
        YamlValue::Sequence(items) => items.iter().find_map(find_tag),
        YamlValue::Mapping(mapping) => mapping
            .iter()
            .find_map(|(key, value)| find_tag(key).or_else(|| find_tag(value))),
        _ => None,
    }
}

/// Scalar keys become strings; sequences and mappings as keys are rejected
fn mapping_key(key: &YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Null => Some("null".to_string()),
        _ => None,
    }
}

fn yaml_to_json(value: &YamlValue) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Sequence(items) => Value::Array(items.iter().map(yaml_to_json).collect()),
        YamlValue::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                // Nested non-scalar keys have no JSON form; render them as YAML
                let key = mapping_key(key).unwrap_or_else(|| {
                    serde_yaml::to_string(key)
                        .map(|s| s.trim_end().to_string())
                        .unwrap_or_default()
                });
                map.insert(key, yaml_to_json(value));
            }
            Value::Object(map)
        }
        // Rejected by `find_tag` before conversion
        YamlValue::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}
