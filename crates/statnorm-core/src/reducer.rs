//! Reducer — strips wrapper scaffolding and flattens `entries` collections.
//!
//! Device statistics arrive wrapped in layers that carry no information of
//! their own:
//!
//! ```text
//! {"entries": {"https://localhost/mgmt/tm/sys/tmm-info/0.0/stats":
//!     {"nestedStats": {"entries": {"oneMinAverageSystem": {"value": 5}}}}}}
//! ```
//!
//! reduces to `{"tmm-info/0.0/stats": {"oneMinAverageSystem": 5}}`.
//!
//! Rules, checked in order for every node:
//!
//! 1. a mapping whose only key is a [scaffold key](SCAFFOLD_KEYS) is replaced
//!    by its reduced value;
//! 2. a mapping holding an `entries` mapping is replaced by that mapping, with
//!    host/path prefixes stripped from its keys, then reduced as a whole
//!    (with `convertArrayToMap` set, an `entries` sequence is pivoted first
//!    and handled the same way);
//! 3. a sequence is pivoted into a mapping when `convertArrayToMap` is set,
//!    otherwise its elements are reduced in order;
//! 4. any other mapping has its values reduced, keys untouched;
//! 5. scalars are returned as is.
//!
//! Anything that fits none of the special shapes (an `entries` key holding a
//! scalar, an unknown wrapper name) falls through to rule 4. Payload shapes
//! differ across device versions, so unrecognised structure is kept, not
//! rejected.

use serde_json::Value;

use crate::array_map::convert_array_to_map;
use crate::config::ReducerConfig;
use crate::error::{Error, Result};
use crate::options::{ArrayToMapOptions, NormalizationOptions};
use crate::types::Mapping;

/// Key names that mark a sole-key wrapper around a substantive value.
pub static SCAFFOLD_KEYS: phf::Set<&'static str> = phf::phf_set! {
    "nestedStats",
    "value",
    "description",
    "color",
};

/// Key of a collection container.
pub const ENTRIES_KEY: &str = "entries";

/// Reduces one payload tree. Cheap to build; holds only borrowed settings.
#[derive(Debug, Clone, Copy)]
pub struct Reducer<'a> {
    config: &'a ReducerConfig,
    pivot: Option<&'a ArrayToMapOptions>,
}

impl<'a> Reducer<'a> {
    pub fn new(config: &'a ReducerConfig, pivot: Option<&'a ArrayToMapOptions>) -> Self {
        Self { config, pivot }
    }

    pub fn reduce(&self, node: Value) -> Result<Value> {
        self.reduce_at(node, 0)
    }

    fn reduce_at(&self, node: Value, depth: usize) -> Result<Value> {
        if depth > self.config.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.config.max_depth,
            });
        }

        match node {
            Value::Object(mut map) => {
                if let Some(inner) = take_scaffold(&mut map) {
                    return self.reduce_at(inner, depth + 1);
                }
                if let Some(pivot) = self.pivot {
                    // Pivot an entries sequence up front so rule 2 sees a mapping.
                    if let Some(entries) = map.get_mut(ENTRIES_KEY).filter(|v| v.is_array()) {
                        if let Value::Array(items) = entries.take() {
                            *entries = Value::Object(convert_array_to_map(items, pivot)?);
                        }
                    }
                }
                if map.get(ENTRIES_KEY).is_some_and(Value::is_object) {
                    if let Some(Value::Object(entries)) = map.remove(ENTRIES_KEY) {
                        let flat = self.flatten_entries(entries);
                        return self.reduce_at(Value::Object(flat), depth + 1);
                    }
                }
                let reduced = map
                    .into_iter()
                    .map(|(key, value)| -> Result<(String, Value)> {
                        Ok((key, self.reduce_at(value, depth + 1)?))
                    })
                    .collect::<Result<Mapping>>()?;
                Ok(Value::Object(reduced))
            }
            Value::Array(items) => match self.pivot {
                Some(pivot) => {
                    let pivoted = convert_array_to_map(items, pivot)?;
                    self.reduce_at(Value::Object(pivoted), depth + 1)
                }
                None => items
                    .into_iter()
                    .map(|item| self.reduce_at(item, depth + 1))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array),
            },
            scalar => Ok(scalar),
        }
    }

    /// Re-key an `entries` mapping by its stripped keys. Children are left
    /// unreduced; the caller reduces the result as a whole.
    fn flatten_entries(&self, entries: Mapping) -> Mapping {
        tracing::trace!(entries = entries.len(), "flattening entries container");
        entries
            .into_iter()
            .map(|(key, value)| (self.strip_entry_key(&key).to_string(), value))
            .collect()
    }

    fn strip_entry_key<'k>(&self, key: &'k str) -> &'k str {
        let key = key
            .strip_prefix(self.config.host_prefix.as_str())
            .unwrap_or(key);
        self.config
            .path_prefixes
            .iter()
            .find_map(|prefix| key.strip_prefix(prefix.as_str()))
            .unwrap_or(key)
    }
}

/// Remove and return the value of a sole scaffold key, leaving `map` empty.
fn take_scaffold(map: &mut Mapping) -> Option<Value> {
    if map.len() != 1 {
        return None;
    }
    let key = map.keys().next().filter(|k| SCAFFOLD_KEYS.contains(k.as_str()))?.clone();
    map.remove(&key)
}

/// Reduce `node` with the default reducer settings and the `convertArrayToMap`
/// part of `options`.
pub fn reduce(node: Value, options: &NormalizationOptions) -> Result<Value> {
    let config = ReducerConfig::default();
    Reducer::new(&config, options.convert_array_to_map.as_ref()).reduce(node)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
