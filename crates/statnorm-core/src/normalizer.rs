//! Normalizer — runs the stages in their fixed order.
//!
//! ```text
//! reduce → key path → filter → rename → custom function
//! ```
//!
//! Reduction always runs; each later stage runs only when its option is set
//! and sees the output of the last stage that ran. Filtering expects
//! extracted data and renaming expects filtered data, so the order is not
//! configurable. Any stage error aborts the call; nothing partial is returned.

use serde_json::Value;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::filter::KeyFilter;
use crate::functions;
use crate::key_path;
use crate::options::NormalizationOptions;
use crate::reducer::Reducer;
use crate::rename::KeyRenamer;

/// Normalization engine. Immutable after construction; share freely.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: EngineConfig,
}

impl Normalizer {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Normalize one payload.
    pub fn normalize(&self, data: Value, options: &NormalizationOptions) -> Result<Value> {
        // Fail before doing any work if the custom function call is malformed.
        if let Some(call) = &options.run_custom_function {
            functions::check_args(&call.args)?;
        }

        let max_depth = self.config.reducer.max_depth;

        let mut data = Reducer::new(&self.config.reducer, options.convert_array_to_map.as_ref())
            .reduce(data)?;
        tracing::debug!(stage = "reduce", "stage complete");

        if let Some(path) = &options.key {
            data = key_path::take(data, path, &self.config.key_path.separator);
            tracing::debug!(stage = "key_path", path = %path, "stage complete");
        }

        if let Some(keys) = &options.filter_by_keys {
            data = KeyFilter::new(keys, max_depth).apply(data)?;
            tracing::debug!(stage = "filter", keys = keys.len(), "stage complete");
        }

        if let Some(patterns) = &options.rename_keys_by_pattern {
            data = KeyRenamer::new(patterns, max_depth)?.apply(data)?;
            tracing::debug!(stage = "rename", rules = patterns.len(), "stage complete");
        }

        if let Some(call) = &options.run_custom_function {
            data = functions::dispatch(data, call)?;
            tracing::debug!(stage = "custom_function", function = %call.name, "stage complete");
        }

        Ok(data)
    }
}

/// Normalize `data` with the default engine configuration.
pub fn normalize(data: Value, options: &NormalizationOptions) -> Result<Value> {
    Normalizer::default().normalize(data, options)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
