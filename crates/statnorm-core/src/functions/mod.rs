//! Custom function dispatch.
//!
//! `runCustomFunction` names one entry of a closed, compile-time registry.
//! Each function receives a single record: `{"data": <tree>}` merged with the
//! caller's `args`. Functions decode the fields they need with serde, so a
//! bad argument surfaces as an ordinary [`FunctionError`].

pub mod builtin;

use serde_json::Value;

use crate::error::{Error, FunctionError, Result};
use crate::options::CustomFunctionCall;
use crate::types::Mapping;

/// Field of the argument record that carries the tree being normalized.
pub const DATA_FIELD: &str = "data";

/// Signature every registered function implements.
pub type CustomFn = fn(Mapping) -> std::result::Result<Value, FunctionError>;

static REGISTRY: phf::Map<&'static str, CustomFn> = phf::phf_map! {
    "getSum" => builtin::get_sum as CustomFn,
    "getAverage" => builtin::get_average as CustomFn,
    "getFirstKey" => builtin::get_first_key as CustomFn,
    "getPercentFromKeys" => builtin::get_percent_from_keys as CustomFn,
    "getKeysCount" => builtin::get_keys_count as CustomFn,
};

/// Find a registered function by name.
pub fn lookup(name: &str) -> Option<CustomFn> {
    REGISTRY.get(name).copied()
}

/// Names of every registered function, in no particular order.
pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.keys().copied()
}

/// Reject argument sets that would shadow the `data` field.
pub fn check_args(args: &Mapping) -> Result<()> {
    if args.contains_key(DATA_FIELD) {
        return Err(Error::ReservedArgument);
    }
    Ok(())
}

/// Run `call` on `data`.
///
/// Lookup misses and failures inside the function are both reported as
/// [`Error::CustomFunction`].
pub fn dispatch(data: Value, call: &CustomFunctionCall) -> Result<Value> {
    check_args(&call.args)?;

    let wrap = |source: FunctionError| Error::CustomFunction {
        function: call.name.clone(),
        source,
    };
    let func = lookup(&call.name).ok_or_else(|| wrap(FunctionError::Unknown(call.name.clone())))?;

    let mut record = Mapping::new();
    record.insert(DATA_FIELD.to_string(), data);
    record.extend(call.args.iter().map(|(k, v)| (k.clone(), v.clone())));

    tracing::debug!(function = %call.name, args = call.args.len(), "running custom function");
    func(record).map_err(wrap)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
