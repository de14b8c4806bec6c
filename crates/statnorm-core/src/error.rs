//! Error types for statnorm-core.
//!
//! Stage errors propagate unchanged to the caller of
//! [`Normalizer::normalize`](crate::Normalizer::normalize). Only the custom
//! function stage wraps what it catches, so its failures always read with the
//! same `runCustomFunction failed:` prefix.

/// Errors returned by the normalization pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `runCustomFunction.args` tried to supply the reserved `data` field.
    #[error("runCustomFunction args must not contain the reserved \"data\" field")]
    ReservedArgument,

    /// A registered function could not be found or failed while running.
    #[error("runCustomFunction failed: {function}: {source}")]
    CustomFunction {
        function: String,
        #[source]
        source: FunctionError,
    },

    /// A `renameKeysByPattern` pattern is not a valid regex.
    #[error("invalid rename pattern for trigger {trigger:?}: {source}")]
    InvalidPattern {
        trigger: String,
        #[source]
        source: regex::Error,
    },

    /// A sequence could not be pivoted into a mapping.
    #[error("convertArrayToMap: {0}")]
    ArrayToMap(String),

    /// The payload nests deeper than the configured limit.
    #[error("payload nesting exceeds the limit of {limit} levels")]
    DepthExceeded { limit: usize },
}

/// Failure inside the custom function registry.
#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    #[error("unknown function {0:?}")]
    Unknown(String),

    #[error("invalid arguments: {0}")]
    InvalidArgs(#[from] serde_json::Error),

    #[error("{0}")]
    Invocation(String),
}

/// Result alias used throughout statnorm-core.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_function_message_has_stable_prefix() {
        let err = Error::CustomFunction {
            function: "getNothing".to_string(),
            source: FunctionError::Unknown("getNothing".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("runCustomFunction failed:"), "{msg}");
        assert!(msg.contains("getNothing"));
    }
}
