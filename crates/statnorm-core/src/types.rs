//! Core types for statnorm-core.
//!
//! Payload nodes are plain [`serde_json::Value`]s. The workspace enables
//! serde_json's `preserve_order` feature, so mapping iteration follows
//! insertion order everywhere in the pipeline. [`Shape`] gives the three-way
//! view the stages actually branch on.

use serde_json::{Map, Value};

/// A single node of a device payload: scalar, sequence or mapping.
pub type NormalizableValue = Value;

/// Mapping node storage.
pub type Mapping = Map<String, Value>;

/// In-band result of a key-path lookup that found nothing.
///
/// Absent metrics are common on real devices, so a miss travels down the
/// pipeline as this scalar instead of failing the call.
pub const MISSING_KEY: &str = "missing key";

/// Structural view of a [`NormalizableValue`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    /// Null, boolean, number or string.
    Scalar(&'a Value),
    Sequence(&'a [Value]),
    Mapping(&'a Mapping),
}

impl<'a> Shape<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => Shape::Sequence(items),
            Value::Object(map) => Shape::Mapping(map),
            other => Shape::Scalar(other),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Scalar(_) => "scalar",
            Shape::Sequence(_) => "sequence",
            Shape::Mapping(_) => "mapping",
        }
    }
}

/// Build the [`MISSING_KEY`] sentinel value.
pub fn missing_key() -> Value {
    Value::String(MISSING_KEY.to_string())
}

/// Whether `value` is the [`MISSING_KEY`] sentinel.
pub fn is_missing_key(value: &Value) -> bool {
    value.as_str() == Some(MISSING_KEY)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn shape_classifies_every_json_kind() {
        assert_eq!(Shape::of(&json!(null)).kind(), "scalar");
        assert_eq!(Shape::of(&json!(true)).kind(), "scalar");
        assert_eq!(Shape::of(&json!(1.5)).kind(), "scalar");
        assert_eq!(Shape::of(&json!("x")).kind(), "scalar");
        assert_eq!(Shape::of(&json!([1])).kind(), "sequence");
        assert_eq!(Shape::of(&json!({"a": 1})).kind(), "mapping");
    }

    #[test]
    fn sentinel_round_trip() {
        assert!(is_missing_key(&missing_key()));
        assert!(!is_missing_key(&json!("missing")));
        assert!(!is_missing_key(&json!({"missing key": 1})));
    }
}
