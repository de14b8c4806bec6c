//! Test builders — ergonomic constructors for `NormalizationOptions`.
//!
//! These builders are designed for readability in tests, not for production
//! use. They panic on invalid input rather than returning `Result`.

use serde_json::{Map, Value};
use statnorm_core::options::RenamePatterns;
use statnorm_core::{ArrayToMapOptions, CustomFunctionCall, NormalizationOptions, RenameRule};

/// Fluent builder for [`NormalizationOptions`].
///
/// # Example
///
/// ```rust
/// let opts = OptionsBuilder::new()
///     .key("system")
///     .filter(&["Util"])
///     .rename("tmm", r"tmm_(\d+)", 1)
///     .build();
/// ```
#[derive(Default)]
pub struct OptionsBuilder {
    opts: NormalizationOptions,
}

impl OptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, path: &str) -> Self {
        self.opts.key = Some(path.to_string());
        self
    }

    pub fn filter(mut self, keys: &[&str]) -> Self {
        self.opts.filter_by_keys = Some(keys.iter().map(|k| k.to_string()).collect());
        self
    }

    pub fn rename(mut self, trigger: &str, pattern: &str, group: usize) -> Self {
        self.rules().0.push((trigger.to_string(), RenameRule::pattern(pattern, group)));
        self
    }

    pub fn rename_constant(mut self, trigger: &str, constant: &str) -> Self {
        self.rules().0.push((trigger.to_string(), RenameRule::constant(constant)));
        self
    }

    pub fn pivot(mut self, key_name: &str, prefix: Option<&str>) -> Self {
        self.opts.convert_array_to_map = Some(ArrayToMapOptions {
            key_name: key_name.to_string(),
            key_name_prefix: prefix.map(str::to_string),
            skip_when_key_missing: false,
        });
        self
    }

    /// Skip elements the pivot cannot key instead of failing. Call after
    /// [`pivot`](Self::pivot).
    pub fn skip_missing(mut self) -> Self {
        match self.opts.convert_array_to_map.as_mut() {
            Some(pivot) => pivot.skip_when_key_missing = true,
            None => panic!("skip_missing needs a pivot"),
        }
        self
    }

    pub fn function(mut self, name: &str, args: Value) -> Self {
        let args: Map<String, Value> = match args {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => panic!("function args must be an object, got {other}"),
        };
        self.opts.run_custom_function = Some(CustomFunctionCall {
            name: name.to_string(),
            args,
        });
        self
    }

    pub fn build(self) -> NormalizationOptions {
        self.opts
    }

    fn rules(&mut self) -> &mut RenamePatterns {
        self.opts
            .rename_keys_by_pattern
            .get_or_insert_with(RenamePatterns::default)
    }
}

/// Options that only reduce.
pub fn reduce_only() -> NormalizationOptions {
    NormalizationOptions::default()
}
