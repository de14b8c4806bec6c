//! Array → map pivot used by the reducer when `convertArrayToMap` is set.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::options::ArrayToMapOptions;
use crate::types::Mapping;

/// Pivot `items` into a mapping keyed by each element's `key_name` field.
///
/// The key field is removed from the element that becomes the value, so
/// `[{"name": "a", "value": 1}]` pivots to `{"a": {"value": 1}}`. A later
/// element with the same key replaces an earlier one.
pub fn convert_array_to_map(items: Vec<Value>, opts: &ArrayToMapOptions) -> Result<Mapping> {
    let mut out = Mapping::new();

    for (index, item) in items.into_iter().enumerate() {
        let mut fields = match item {
            Value::Object(fields) => fields,
            other if opts.skip_when_key_missing => {
                tracing::trace!(index, kind = %kind_name(&other), "skipping non-mapping element");
                continue;
            }
            other => {
                return Err(Error::ArrayToMap(format!(
                    "element {index} is a {} and has no {:?} field",
                    kind_name(&other),
                    opts.key_name
                )))
            }
        };

        let Some(key_value) = fields.shift_remove(&opts.key_name) else {
            if opts.skip_when_key_missing {
                tracing::trace!(index, key = %opts.key_name, "skipping element without key field");
                continue;
            }
            return Err(Error::ArrayToMap(format!(
                "element {index} has no {:?} field",
                opts.key_name
            )));
        };

        let key = key_text(&key_value).ok_or_else(|| {
            Error::ArrayToMap(format!(
                "element {index} field {:?} is a {} and cannot be used as a key",
                opts.key_name,
                kind_name(&key_value)
            ))
        })?;

        let key = match &opts.key_name_prefix {
            Some(prefix) => format!("{prefix}{key}"),
            None => key,
        };
        out.insert(key, Value::Object(fields));
    }

    Ok(out)
}

fn key_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn kind_name(value: &Value) -> &'static str {
    crate::types::Shape::of(value).kind()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
