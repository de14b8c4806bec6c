//! Registered transformation functions.
//!
//! Each takes the merged argument record and returns the replacement tree.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Number, Value};

use crate::error::FunctionError;
use crate::types::Mapping;

type FnResult = Result<Value, FunctionError>;

fn decode<T: DeserializeOwned>(record: Mapping) -> Result<T, FunctionError> {
    Ok(serde_json::from_value(Value::Object(record))?)
}

// ---------------------------------------------------------------------------
// getSum
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SumArgs {
    data: Mapping,
}

/// Sum every numeric field across the entries of a mapping of mappings.
///
/// `{"cpu0": {"user": 1, "idle": 9}, "cpu1": {"user": 3, "idle": 7}}` sums to
/// `{"user": 4, "idle": 16}`. Non-numeric fields and non-mapping entries are
/// skipped.
pub fn get_sum(record: Mapping) -> FnResult {
    let args: SumArgs = decode(record)?;
    let mut totals = Mapping::new();

    for entry in args.data.values() {
        let Value::Object(fields) = entry else {
            continue;
        };
        for (key, value) in fields {
            let Value::Number(n) = value else {
                continue;
            };
            let total = match totals.get(key) {
                Some(Value::Number(acc)) => add(acc, n),
                _ => n.clone(),
            };
            totals.insert(key.clone(), Value::Number(total));
        }
    }

    Ok(Value::Object(totals))
}

fn add(a: &Number, b: &Number) -> Number {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        if let Some(sum) = x.checked_add(y) {
            return Number::from(sum);
        }
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        if let Some(sum) = x.checked_add(y) {
            return Number::from(sum);
        }
    }
    let sum = a.as_f64().unwrap_or(0.0) + b.as_f64().unwrap_or(0.0);
    Number::from_f64(sum).unwrap_or_else(|| Number::from(0))
}

// ---------------------------------------------------------------------------
// getAverage
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AverageArgs {
    data: Mapping,
    key_with_value: String,
}

/// Truncated integer average of `keyWithValue` across the entries of a mapping.
pub fn get_average(record: Mapping) -> FnResult {
    let args: AverageArgs = decode(record)?;
    let values: Vec<f64> = args
        .data
        .values()
        .filter_map(|entry| entry.get(&args.key_with_value)?.as_f64())
        .collect();

    if values.is_empty() {
        return Ok(Value::from(0));
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Ok(Value::from(mean.trunc() as i64))
}

// ---------------------------------------------------------------------------
// getFirstKey
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FirstKeyArgs {
    data: Mapping,
    #[serde(default)]
    split_on_value: Option<String>,
    #[serde(default)]
    key_prefix: Option<String>,
}

/// First key of a mapping, cut at `splitOnValue` and prefixed with `keyPrefix`.
pub fn get_first_key(record: Mapping) -> FnResult {
    let args: FirstKeyArgs = decode(record)?;
    let Some(first) = args.data.keys().next() else {
        return Ok(Value::Null);
    };

    let mut key = match args.split_on_value.as_deref() {
        Some(sep) if !sep.is_empty() => first.split(sep).next().unwrap_or(first).to_string(),
        _ => first.clone(),
    };
    if let Some(prefix) = args.key_prefix {
        key.insert_str(0, &prefix);
    }
    Ok(Value::String(key))
}

// ---------------------------------------------------------------------------
// getPercentFromKeys
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PercentArgs {
    data: Mapping,
    total_key: String,
    partial_key: String,
    #[serde(default)]
    inverse: bool,
}

/// Truncated integer percentage `partialKey / totalKey * 100`, or its
/// complement when `inverse` is set (e.g. used from free memory).
pub fn get_percent_from_keys(record: Mapping) -> FnResult {
    let args: PercentArgs = decode(record)?;
    let number = |key: &str| {
        args.data.get(key).and_then(Value::as_f64).ok_or_else(|| {
            FunctionError::Invocation(format!("field {key:?} is missing or not a number"))
        })
    };
    let total = number(&args.total_key)?;
    let partial = number(&args.partial_key)?;

    if total == 0.0 {
        return Ok(Value::from(0));
    }
    let percent = partial / total * 100.0;
    let percent = if args.inverse { 100.0 - percent } else { percent };
    Ok(Value::from(percent.trunc() as i64))
}

// ---------------------------------------------------------------------------
// getKeysCount
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct CountArgs {
    data: Value,
}

/// Number of entries in a mapping or sequence.
pub fn get_keys_count(record: Mapping) -> FnResult {
    let args: CountArgs = decode(record)?;
    match args.data {
        Value::Object(map) => Ok(Value::from(map.len())),
        Value::Array(items) => Ok(Value::from(items.len())),
        other => Err(FunctionError::Invocation(format!(
            "expected a mapping or sequence, got {}",
            crate::types::Shape::of(&other).kind()
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
