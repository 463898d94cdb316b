//! Runtime type tags and shared helpers for JSON-like values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Runtime type tag of a value under validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// JSON `null`.
    Null,
    /// Boolean values.
    Bool,
    /// Integer or floating-point numbers.
    Number,
    /// Text values.
    String,
    /// Ordered sequences.
    Array,
    /// Key/value maps.
    Object,
}

impl ValueKind {
    /// Tag of the given value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Get a human-readable label for the tag.
    pub fn label(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

/// Length of a value for the length-bound checks, where one is defined.
/// Strings count characters, arrays count elements; other values have no
/// length and the length checks pass them through.
pub(crate) fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(text) => Some(text.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Field lookup used by the presence checks. An entry that is missing or
/// explicitly `null` counts as absent; non-object values have no fields.
pub(crate) fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key).filter(|entry| !entry.is_null()),
        _ => None,
    }
}
