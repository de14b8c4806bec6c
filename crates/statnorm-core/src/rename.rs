//! Pattern-based key renaming.
//!
//! Each rule is keyed by a trigger substring. A rule is only tried on keys
//! containing its trigger, so a cheap substring test gates the regex. When
//! several rules match one key, the one listed last wins.

use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::options::{RenamePatterns, RenameRule};
use crate::types::Mapping;

#[derive(Debug, Clone)]
enum Rewrite {
    Capture { regex: Regex, group: usize },
    Constant(String),
}

#[derive(Debug, Clone)]
struct CompiledRule {
    trigger: String,
    rewrite: Rewrite,
}

/// Compiled `renameKeysByPattern` rules.
#[derive(Debug, Clone)]
pub struct KeyRenamer {
    rules: Vec<CompiledRule>,
    max_depth: usize,
}

impl KeyRenamer {
    /// Compile `patterns`, failing on the first invalid regex.
    pub fn new(patterns: &RenamePatterns, max_depth: usize) -> Result<Self> {
        let rules = patterns
            .iter()
            .map(|(trigger, rule)| -> Result<CompiledRule> {
                let rewrite = match rule {
                    RenameRule::Pattern { pattern, group } => Rewrite::Capture {
                        regex: Regex::new(pattern).map_err(|source| Error::InvalidPattern {
                            trigger: trigger.to_string(),
                            source,
                        })?,
                        group: *group,
                    },
                    RenameRule::Constant { constant } => Rewrite::Constant(constant.clone()),
                };
                Ok(CompiledRule {
                    trigger: trigger.to_string(),
                    rewrite,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules, max_depth })
    }

    /// Rename keys throughout `data`, children before parents.
    pub fn apply(&self, data: Value) -> Result<Value> {
        self.apply_at(data, 0)
    }

    /// The name `key` is rewritten to, or `None` if no rule applies.
    pub fn renamed(&self, key: &str) -> Option<String> {
        let mut result = None;
        for rule in self.rules.iter().filter(|r| key.contains(r.trigger.as_str())) {
            let candidate = match &rule.rewrite {
                Rewrite::Capture { regex, group } => regex
                    .captures(key)
                    .and_then(|caps| caps.get(*group))
                    .map(|m| m.as_str().to_string()),
                Rewrite::Constant(constant) => Some(constant.clone()),
            };
            if candidate.is_some() {
                result = candidate;
            }
        }
        result
    }

    fn apply_at(&self, data: Value, depth: usize) -> Result<Value> {
        if depth > self.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.max_depth,
            });
        }

        match data {
            Value::Object(map) => {
                let mut out = Mapping::new();
                for (key, value) in map {
                    let value = self.apply_at(value, depth + 1)?;
                    let key = match self.renamed(&key) {
                        Some(new_key) => {
                            tracing::trace!(from = %key, to = %new_key, "renamed key");
                            new_key
                        }
                        None => key,
                    };
                    out.insert(key, value);
                }
                Ok(Value::Object(out))
            }
            Value::Array(items) => items
                .into_iter()
                .map(|item| self.apply_at(item, depth + 1))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            scalar => Ok(scalar),
        }
    }
}

/// Rename keys in `data` with the default depth limit.
pub fn rename(data: Value, patterns: &RenamePatterns) -> Result<Value> {
    KeyRenamer::new(patterns, crate::config::ReducerConfig::default().max_depth)?.apply(data)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
