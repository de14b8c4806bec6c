//! Per-call normalization options.
//!
//! Options arrive as JSON alongside each payload (camelCase field names) and
//! select which pipeline stages run. Every field is optional; an empty object
//! means "reduce only".

use serde::Deserialize;
use serde_json::{Map, Value};

/// Options controlling a single [`Normalizer::normalize`](crate::Normalizer::normalize) call.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NormalizationOptions {
    /// Path of the subtree to extract after reduction, segments joined by the
    /// configured separator (`::` by default).
    pub key: Option<String>,
    /// Keep only mapping keys containing at least one of these substrings.
    pub filter_by_keys: Option<Vec<String>>,
    /// Rename keys by regex capture, keyed by trigger substring.
    pub rename_keys_by_pattern: Option<RenamePatterns>,
    /// Pivot sequences into mappings during reduction.
    pub convert_array_to_map: Option<ArrayToMapOptions>,
    /// Registered function to run on the final tree.
    pub run_custom_function: Option<CustomFunctionCall>,
}

/// `convertArrayToMap` options.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArrayToMapOptions {
    /// Field of each element whose value becomes the element's key.
    pub key_name: String,
    #[serde(default)]
    pub key_name_prefix: Option<String>,
    /// Drop elements that lack `key_name` instead of failing.
    #[serde(default)]
    pub skip_when_key_missing: bool,
}

/// `runCustomFunction` options.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomFunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Map<String, Value>,
}

/// How a triggered key is rewritten.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RenameRule {
    /// Replace the key with capture group `group` of `pattern` (0 = whole match).
    Pattern {
        pattern: String,
        #[serde(default)]
        group: usize,
    },
    /// Replace the key with a fixed string.
    Constant { constant: String },
}

impl RenameRule {
    pub fn pattern(pattern: impl Into<String>, group: usize) -> Self {
        RenameRule::Pattern {
            pattern: pattern.into(),
            group,
        }
    }

    pub fn constant(constant: impl Into<String>) -> Self {
        RenameRule::Constant {
            constant: constant.into(),
        }
    }
}

/// Ordered `trigger → rule` list. Order is the order the rules appeared in
/// the source document; it decides which rule wins when several match.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct RenamePatterns(pub Vec<(String, RenameRule)>);

impl RenamePatterns {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RenameRule)> {
        self.0.iter().map(|(trigger, rule)| (trigger.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, RenameRule)> for RenamePatterns {
    fn from_iter<I: IntoIterator<Item = (S, RenameRule)>>(iter: I) -> Self {
        RenamePatterns(iter.into_iter().map(|(t, r)| (t.into(), r)).collect())
    }
}

// serde_json is built with `preserve_order`, so the map iterates in document order.
impl TryFrom<Map<String, Value>> for RenamePatterns {
    type Error = serde_json::Error;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        map.into_iter()
            .map(|(trigger, rule)| -> Result<(String, RenameRule), serde_json::Error> {
                Ok((trigger, serde_json::from_value(rule)?))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(RenamePatterns)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
