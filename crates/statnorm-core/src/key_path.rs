//! Key-path extraction.
//!
//! A path such as `system::cpuInfo::0` names a subtree by its mapping keys.
//! Missing segments are a normal data condition: many metrics are simply
//! absent on some device models. A miss resolves to the
//! [`MISSING_KEY`](crate::MISSING_KEY) sentinel instead of an error.

use serde_json::Value;

use crate::types::missing_key;

/// Default path separator.
pub const DEFAULT_SEPARATOR: &str = "::";

/// Borrow the node at `path`, or `None` if any segment is absent.
///
/// Only mappings are descended; a segment applied to a sequence or scalar is
/// a miss.
pub fn lookup<'a>(data: &'a Value, path: &str, separator: &str) -> Option<&'a Value> {
    path.split(separator)
        .try_fold(data, |node, segment| node.as_object()?.get(segment))
}

/// Clone the node at `path`, or return the missing-key sentinel.
pub fn resolve(data: &Value, path: &str, separator: &str) -> Value {
    match lookup(data, path, separator) {
        Some(found) => found.clone(),
        None => {
            tracing::debug!(path, "key path not present in payload");
            missing_key()
        }
    }
}

/// Move the node at `path` out of `data`, or return the missing-key sentinel.
///
/// Used by the orchestrator, which owns the tree and discards the rest.
pub fn take(data: Value, path: &str, separator: &str) -> Value {
    let mut node = data;
    for segment in path.split(separator) {
        node = match node {
            Value::Object(mut map) => match map.remove(segment) {
                Some(child) => child,
                None => {
                    tracing::debug!(path, segment, "key path not present in payload");
                    return missing_key();
                }
            },
            _ => {
                tracing::debug!(path, segment, "key path descends into a non-mapping");
                return missing_key();
            }
        };
    }
    node
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::is_missing_key;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn payload() -> Value {
        json!({"system": {"cpu": {"0": 12, "1": 30}, "hostname": "bigip1"}, "list": [1, 2]})
    }

    #[test]
    fn resolves_nested_path() {
        assert_eq!(resolve(&payload(), "system::cpu::1", "::"), json!(30));
        assert_eq!(resolve(&payload(), "system", "::"), payload()["system"]);
    }

    #[test]
    fn missing_segment_yields_sentinel_and_leaves_source_alone() {
        let data = payload();
        let before = data.clone();
        let out = resolve(&data, "system::memory::free", "::");
        assert!(is_missing_key(&out));
        assert_eq!(data, before);
    }

    #[test]
    fn sequences_are_not_indexed() {
        assert!(is_missing_key(&resolve(&payload(), "list::0", "::")));
    }

    #[test]
    fn keys_containing_slashes_resolve() {
        let data = json!({"tmm-info/0.0/stats": {"oneMinAverageSystem": 5}});
        assert_eq!(
            resolve(&data, "tmm-info/0.0/stats::oneMinAverageSystem", "::"),
            json!(5)
        );
    }

    #[test]
    fn custom_separator() {
        assert_eq!(resolve(&payload(), "system.hostname", "."), json!("bigip1"));
    }

    #[test]
    fn lookup_borrows() {
        let data = payload();
        assert_eq!(lookup(&data, "system::cpu::0", "::"), Some(&json!(12)));
        assert_eq!(lookup(&data, "nope", "::"), None);
    }

    #[test]
    fn take_matches_resolve() {
        for path in ["system::cpu", "system::hostname", "system::gone", "list::0", "list"] {
            let data = payload();
            assert_eq!(take(data.clone(), path, "::"), resolve(&data, path, "::"), "{path}");
        }
    }
}
