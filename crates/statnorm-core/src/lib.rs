//! statnorm-core — normalization engine for device statistics payloads.
//!
//! This crate exposes each normalization stage as a public module, plus the
//! shared types and the orchestrator that composes them.
//!
//! # Pipeline
//!
//! ```text
//! payload ──► reduce ──► key path ──► filter ──► rename ──► custom function
//!               │
//!               └──► array → map pivot
//! ```
//!
//! Every stage past `reduce` is gated by [`NormalizationOptions`]. The whole
//! pipeline is a synchronous, single pass over a tree the caller hands over;
//! nothing is retained between calls.

pub mod array_map;
pub mod config;
pub mod error;
pub mod filter;
pub mod functions;
pub mod key_path;
pub mod normalizer;
pub mod options;
pub mod reducer;
pub mod rename;
pub mod types;

pub use config::EngineConfig;
pub use error::{Error, FunctionError, Result};
pub use normalizer::{normalize, Normalizer};
pub use options::{ArrayToMapOptions, CustomFunctionCall, NormalizationOptions, RenameRule};
pub use types::{NormalizableValue, Shape, MISSING_KEY};
