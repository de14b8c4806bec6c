//! Prunes mapping keys that match none of an include list.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::Mapping;

/// Keeps mapping keys that contain at least one include substring.
///
/// Matching is case-sensitive and unanchored. Kept values are filtered
/// recursively; sequences and scalars pass through untouched, including any
/// mappings nested inside a sequence.
#[derive(Debug, Clone, Copy)]
pub struct KeyFilter<'a> {
    include: &'a [String],
    max_depth: usize,
}

impl<'a> KeyFilter<'a> {
    pub fn new(include: &'a [String], max_depth: usize) -> Self {
        Self { include, max_depth }
    }

    pub fn apply(&self, data: Value) -> Result<Value> {
        self.apply_at(data, 0)
    }

    fn keeps(&self, key: &str) -> bool {
        self.include.iter().any(|needle| key.contains(needle.as_str()))
    }

    fn apply_at(&self, data: Value, depth: usize) -> Result<Value> {
        if depth > self.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.max_depth,
            });
        }
        let Value::Object(map) = data else {
            return Ok(data);
        };

        let mut kept = Mapping::new();
        for (key, value) in map {
            if self.keeps(&key) {
                kept.insert(key, self.apply_at(value, depth + 1)?);
            } else {
                tracing::trace!(key = %key, "filtered out");
            }
        }
        Ok(Value::Object(kept))
    }
}

/// Filter `data` by `keys` with the default depth limit.
pub fn filter(data: Value, keys: &[String]) -> Result<Value> {
    KeyFilter::new(keys, crate::config::ReducerConfig::default().max_depth).apply(data)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
