//! Domain-specific assertion macros for statnorm harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! normalization invariant was violated.

/// Assert that normalizing `$data` with `$opts` yields `$expected` (any
/// `json!`-compatible literal).
///
/// ```rust
/// assert_normalizes!(json!({"value": 5}), reduce_only(), 5);
/// ```
#[macro_export]
macro_rules! assert_normalizes {
    ($data:expr, $opts:expr, $expected:tt) => {{
        let input: serde_json::Value = $data;
        let opts: statnorm_core::NormalizationOptions = $opts;
        let expected = serde_json::json!($expected);
        match statnorm_core::normalize(input.clone(), &opts) {
            Ok(actual) => pretty_assertions::assert_eq!(
                actual, expected,
                "normalize() output differs\n  input: {}", input
            ),
            Err(err) => panic!(
                "assert_normalizes! failed: normalize() returned an error: {err}\n  input: {}",
                input
            ),
        }
    }};
}

/// Assert that a value is the missing-key sentinel.
#[macro_export]
macro_rules! assert_missing_key {
    ($value:expr) => {{
        let value: &serde_json::Value = &$value;
        if !statnorm_core::types::is_missing_key(value) {
            panic!(
                "assert_missing_key! failed: expected {:?}, got {}",
                statnorm_core::MISSING_KEY,
                value
            );
        }
    }};
}

/// Assert that every mapping key in `value`, at any depth, satisfies `pred`.
pub fn assert_all_keys(value: &serde_json::Value, pred: impl Fn(&str) -> bool + Copy) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                assert!(pred(key), "key {key:?} violates the predicate in {value}");
                assert_all_keys(child, pred);
            }
        }
        serde_json::Value::Array(items) => items.iter().for_each(|i| assert_all_keys(i, pred)),
        _ => {}
    }
}
