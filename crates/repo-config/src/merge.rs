//! Merging of chain configs with caller defaults
//!
//! Strategies receive the caller's defaults and the existing configs of a
//! chain, lowest precedence first: the furthest `_extends` ancestor comes
//! first and the requested file comes last.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::chain::ResolutionChain;
use crate::extends::EXTENDS_KEY;
use crate::file::Configuration;

/// Combines defaults and chain configs into one configuration
pub trait MergeStrategy: Send + Sync {
    fn merge(&self, defaults: &Configuration, configs: &[Configuration]) -> Configuration;
}

impl<F> MergeStrategy for F
where
    F: Fn(&Configuration, &[Configuration]) -> Configuration + Send + Sync,
{
    fn merge(&self, defaults: &Configuration, configs: &[Configuration]) -> Configuration {
        self(defaults, configs)
    }
}

/// Key-by-key override; a later value replaces an earlier one wholesale
#[derive(Debug, Clone, Copy, Default)]
pub struct ShallowMerge;

impl MergeStrategy for ShallowMerge {
    fn merge(&self, defaults: &Configuration, configs: &[Configuration]) -> Configuration {
        let mut merged = defaults.clone();
        for config in configs {
            for (key, value) in config {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    }
}

/// Recursive merge of nested objects; arrays and scalars are replaced
#[derive(Debug, Clone, Copy, Default)]
pub struct DeepMerge;

impl MergeStrategy for DeepMerge {
    fn merge(&self, defaults: &Configuration, configs: &[Configuration]) -> Configuration {
        let mut merged = defaults.clone();
        for config in configs {
            for (key, value) in config {
                if let Some(base) = merged.get_mut(key) {
                    deep_merge_value(base, value);
                } else {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        merged
    }
}

/// Deep merge two JSON values
///
/// If both values are objects, merge them recursively with `other` taking precedence.
/// Otherwise, `other` replaces `base`.
fn deep_merge_value(base: &mut Value, other: &Value) {
    match (base, other) {
        (Value::Object(base_map), Value::Object(other_map)) => {
            for (key, other_val) in other_map {
                if let Some(base_val) = base_map.get_mut(key) {
                    deep_merge_value(base_val, other_val);
                } else {
                    base_map.insert(key.clone(), other_val.clone());
                }
            }
        }
        (base, other) => {
            *base = other.clone();
        }
    }
}

/// Function computing the final configuration from the chain configs alone
pub type DefaultsFn = dyn Fn(&[Configuration]) -> Configuration + Send + Sync;

/// Caller-supplied defaults
#[derive(Clone)]
pub enum Defaults {
    /// Lowest-precedence layer of the merge
    Map(Configuration),
    /// Replaces merging entirely; receives configs lowest precedence first
    Function(Arc<DefaultsFn>),
}

impl Default for Defaults {
    fn default() -> Self {
        Self::Map(Configuration::new())
    }
}

impl fmt::Debug for Defaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl From<Configuration> for Defaults {
    fn from(map: Configuration) -> Self {
        Self::Map(map)
    }
}

/// Produce the final configuration for a resolved chain.
///
/// Uses `strategy` when given and [`ShallowMerge`] otherwise; a
/// [`Defaults::Function`] takes over the whole merge. The result never
/// contains the `_extends` key.
pub fn merge_chain(
    defaults: &Defaults,
    strategy: Option<&dyn MergeStrategy>,
    chain: &ResolutionChain,
) -> Configuration {
    let configs = chain.configs();
    let mut merged = match defaults {
        Defaults::Function(compute) => (compute.as_ref())(&configs),
        Defaults::Map(map) => strategy.unwrap_or(&ShallowMerge).merge(map, &configs),
    };
    merged.remove(EXTENDS_KEY);
    merged
}
