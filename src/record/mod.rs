//! Raw trip records as they come back from the trip and shift endpoints.
//!
//! Records are kept as [`serde_json::Value`] because the same trip can arrive
//! in several shapes. Everything in here reads, nothing mutates.

use serde_json::Value;
use thiserror::Error;

mod fields;
pub use fields::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected a trip object, found {0}")]
    NotAnObject(&'static str),
    #[error("Expected a list of trips, found {0}")]
    NotAnArray(&'static str),
}

/// Parses a single raw trip record.
pub fn parse(input: &str) -> Result<Value, self::Error> {
    let value: Value = serde_json::from_str(input)?;
    if !value.is_object() {
        return Err(self::Error::NotAnObject(kind(&value)));
    }
    Ok(value)
}

/// Parses a list of raw trip records. Entries are not validated here, the
/// normalizer drops what it cannot resolve.
pub fn parse_many(input: &str) -> Result<Vec<Value>, self::Error> {
    match serde_json::from_str(input)? {
        Value::Array(records) => Ok(records),
        other => Err(self::Error::NotAnArray(kind(&other))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Scalar values as text. Null, arrays and objects carry no text.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Follows `path` through nested objects. Null counts as absent.
pub fn lookup<'a>(record: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(record, |value, key| value.get(key))
        .filter(|value| !value.is_null())
}

/// First non-blank text found along `paths`.
pub fn first_text(record: &Value, paths: &[FieldPath]) -> Option<String> {
    crate::shared::first_available(
        paths
            .iter()
            .map(|path| lookup(record, path).and_then(text)),
    )
}

/// First value present along `paths`, whatever its type.
pub fn first_present<'a>(record: &'a Value, paths: &[FieldPath]) -> Option<&'a Value> {
    paths.iter().find_map(|path| lookup(record, path))
}

/// First non-empty array found along `paths`.
pub fn first_series<'a>(record: &'a Value, paths: &[FieldPath]) -> &'a [Value] {
    paths
        .iter()
        .filter_map(|path| lookup(record, path)?.as_array())
        .find(|series| !series.is_empty())
        .map(|series| series.as_slice())
        .unwrap_or_default()
}
