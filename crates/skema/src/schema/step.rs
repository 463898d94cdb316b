//! Atomic pipeline steps.

use std::fmt;
use std::mem;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map, Value};

use super::failure::{Failure, FailureContext, FailureKind};
use super::pipeline::Schema;
use super::value::{self, ValueKind};
use crate::format;

pub(crate) type CheckFn = Box<dyn Fn(&Value) -> bool + Send + Sync>;
pub(crate) type AlterFn = Box<dyn Fn(Value) -> Value + Send + Sync>;
pub(crate) type ElementFactory = Box<dyn Fn() -> Schema + Send + Sync>;

/// One atomic unit in a validation pipeline: consumes a value and either
/// passes it on (possibly transformed) or rejects it with a [`Failure`].
///
/// A closed enum rather than opaque closures, so each failure carries typed
/// parameters for the check that rejected the value. The `message` field is
/// the per-step override; `None` defers to the process-wide table at
/// evaluation time.
pub(crate) enum Step {
    TypeOf { expected: ValueKind, message: Option<String> },
    RequireKeys { keys: Vec<String>, message: Option<String> },
    Check { predicate: CheckFn, message: Option<String> },
    Alter { transform: AlterFn },
    MatchPattern { pattern: Regex, message: Option<String> },
    Shape { fields: IndexMap<String, Schema> },
    Keep { keys: Vec<String>, message: Option<String> },
    EnumOf { allowed: Vec<Value>, message: Option<String> },
    IsArray { message: Option<String> },
    Each { element: ElementFactory },
    Format { name: String, message: Option<String> },
    Min { bound: f64, message: Option<String> },
    Max { bound: f64, message: Option<String> },
    MinLength { bound: usize, message: Option<String> },
    MaxLength { bound: usize, message: Option<String> },
    Range { min: f64, max: f64, message: Option<String> },
    RangeLength { min: usize, max: usize, message: Option<String> },
}

impl Step {
    /// Apply the step to a value.
    pub(crate) fn apply(&self, value: Value) -> Result<Value, Failure> {
        match self {
            Step::TypeOf { expected, message } => {
                if ValueKind::of(&value) != *expected {
                    return Err(Failure::new(
                        FailureKind::TypeMismatch,
                        message.as_deref(),
                        value,
                        FailureContext::Type { expected: *expected },
                    ));
                }
                Ok(value)
            }
            Step::RequireKeys { keys, message } => {
                // First missing key wins, in listed order.
                for key in keys {
                    if value::field(&value, key).is_none() {
                        return Err(Failure::new(
                            FailureKind::MissingProperty,
                            message.as_deref(),
                            value,
                            FailureContext::Keys { keys: keys.clone() },
                        )
                        .at(key.as_str()));
                    }
                }
                Ok(value)
            }
            Step::Check { predicate, message } => {
                if !predicate(&value) {
                    return Err(Failure::new(
                        FailureKind::CheckFailed,
                        message.as_deref(),
                        value,
                        FailureContext::None,
                    ));
                }
                Ok(value)
            }
            Step::Alter { transform } => Ok(transform(value)),
            Step::MatchPattern { pattern, message } => {
                let matched = value.as_str().is_some_and(|text| pattern.is_match(text));
                if !matched {
                    return Err(Failure::new(
                        FailureKind::PatternMismatch,
                        message.as_deref(),
                        value,
                        FailureContext::Pattern { pattern: pattern.to_string() },
                    ));
                }
                Ok(value)
            }
            Step::Shape { fields } => apply_shape(fields, value),
            Step::Keep { keys, message } => {
                let mut projected = Map::new();
                for key in keys {
                    match value::field(&value, key).cloned() {
                        Some(entry) => {
                            projected.insert(key.clone(), entry);
                        }
                        None => {
                            return Err(Failure::new(
                                FailureKind::MissingProperty,
                                message.as_deref(),
                                value,
                                FailureContext::Keys { keys: keys.clone() },
                            )
                            .at(key.as_str()));
                        }
                    }
                }
                Ok(Value::Object(projected))
            }
            Step::EnumOf { allowed, message } => {
                if !allowed.contains(&value) {
                    return Err(Failure::new(
                        FailureKind::EnumMismatch,
                        message.as_deref(),
                        value,
                        FailureContext::Enum { allowed: allowed.clone() },
                    ));
                }
                Ok(value)
            }
            Step::IsArray { message } => {
                if !value.is_array() {
                    return Err(Failure::new(
                        FailureKind::NotArray,
                        message.as_deref(),
                        value,
                        FailureContext::None,
                    ));
                }
                Ok(value)
            }
            Step::Each { element } => apply_each(element, value),
            Step::Format { name, message } => {
                // Unregistered names pass the value through unchanged.
                match format::lookup(name) {
                    Some(checker) if !checker(&value) => Err(Failure::new(
                        FailureKind::IncorrectFormat,
                        message.as_deref(),
                        value,
                        FailureContext::Format { format: name.clone() },
                    )),
                    _ => Ok(value),
                }
            }
            Step::Min { bound, message } => {
                if value.as_f64().is_some_and(|n| n < *bound) {
                    return Err(Failure::new(
                        FailureKind::TooSmall,
                        message.as_deref(),
                        value,
                        FailureContext::Bound { bound: *bound },
                    ));
                }
                Ok(value)
            }
            Step::Max { bound, message } => {
                if value.as_f64().is_some_and(|n| n > *bound) {
                    return Err(Failure::new(
                        FailureKind::TooLarge,
                        message.as_deref(),
                        value,
                        FailureContext::Bound { bound: *bound },
                    ));
                }
                Ok(value)
            }
            Step::MinLength { bound, message } => {
                if value::length_of(&value).is_some_and(|len| len < *bound) {
                    return Err(Failure::new(
                        FailureKind::TooShort,
                        message.as_deref(),
                        value,
                        FailureContext::LengthBound { bound: *bound },
                    ));
                }
                Ok(value)
            }
            Step::MaxLength { bound, message } => {
                if value::length_of(&value).is_some_and(|len| len > *bound) {
                    return Err(Failure::new(
                        FailureKind::TooLong,
                        message.as_deref(),
                        value,
                        FailureContext::LengthBound { bound: *bound },
                    ));
                }
                Ok(value)
            }
            Step::Range { min, max, message } => {
                if value.as_f64().is_some_and(|n| n < *min || n > *max) {
                    return Err(Failure::new(
                        FailureKind::OutOfRange,
                        message.as_deref(),
                        value,
                        FailureContext::Range { min: *min, max: *max },
                    ));
                }
                Ok(value)
            }
            Step::RangeLength { min, max, message } => {
                if value::length_of(&value).is_some_and(|len| len < *min || len > *max) {
                    return Err(Failure::new(
                        FailureKind::WrongLength,
                        message.as_deref(),
                        value,
                        FailureContext::LengthRange { min: *min, max: *max },
                    ));
                }
                Ok(value)
            }
        }
    }

    /// Install a per-step message override. Steps that never fail have no
    /// message to override.
    pub(crate) fn set_message(&mut self, text: String) {
        match self {
            Step::TypeOf { message, .. }
            | Step::RequireKeys { message, .. }
            | Step::Check { message, .. }
            | Step::MatchPattern { message, .. }
            | Step::Keep { message, .. }
            | Step::EnumOf { message, .. }
            | Step::IsArray { message }
            | Step::Format { message, .. }
            | Step::Min { message, .. }
            | Step::Max { message, .. }
            | Step::MinLength { message, .. }
            | Step::MaxLength { message, .. }
            | Step::Range { message, .. }
            | Step::RangeLength { message, .. } => *message = Some(text),
            Step::Alter { .. } | Step::Shape { .. } | Step::Each { .. } => {}
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Step::TypeOf { .. } => "type_of",
            Step::RequireKeys { .. } => "require_keys",
            Step::Check { .. } => "check",
            Step::Alter { .. } => "alter",
            Step::MatchPattern { .. } => "match_pattern",
            Step::Shape { .. } => "shape",
            Step::Keep { .. } => "keep",
            Step::EnumOf { .. } => "enum_of",
            Step::IsArray { .. } => "is_array",
            Step::Each { .. } => "each",
            Step::Format { .. } => "format_as",
            Step::Min { .. } => "min",
            Step::Max { .. } => "max",
            Step::MinLength { .. } => "min_length",
            Step::MaxLength { .. } => "max_length",
            Step::Range { .. } => "range",
            Step::RangeLength { .. } => "range_length",
        }
    }
}

// Caller-supplied closures have no useful Debug form, so steps print as
// their builder-method name.
impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Conditional field validation: every field named in `fields` that is
/// present in the value is run through its schema, and the (possibly
/// transformed) result is written back. Absent fields are skipped; pair
/// with `keep`/`require_keys` to make them mandatory.
fn apply_shape(fields: &IndexMap<String, Schema>, mut value: Value) -> Result<Value, Failure> {
    let Value::Object(ref mut map) = value else {
        return Ok(value);
    };
    for (key, schema) in fields {
        let Some(entry) = map.get_mut(key) else {
            continue;
        };
        if entry.is_null() {
            continue;
        }
        let validated = schema
            .evaluate(mem::take(entry))
            .map_err(|failure| failure.prepend(key.as_str()))?;
        *entry = validated;
    }
    Ok(value)
}

/// Element-wise validation. A fresh schema is obtained from the factory for
/// every element; the validated result is written back unconditionally.
fn apply_each(element: &ElementFactory, mut value: Value) -> Result<Value, Failure> {
    match value {
        Value::Array(ref mut items) => {
            for (index, item) in items.iter_mut().enumerate() {
                let validated = element()
                    .evaluate(mem::take(item))
                    .map_err(|failure| failure.prepend(index))?;
                *item = validated;
            }
        }
        Value::Object(ref mut map) => {
            for (key, entry) in map.iter_mut() {
                let validated = element()
                    .evaluate(mem::take(entry))
                    .map_err(|failure| failure.prepend(key.as_str()))?;
                *entry = validated;
            }
        }
        _ => {}
    }
    Ok(value)
}
