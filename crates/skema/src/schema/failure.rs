//! Failure reporting for validation pipelines.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::value::ValueKind;
use crate::messages;

/// Category of validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Runtime type tag differs from the expected one.
    TypeMismatch,
    /// A required field is missing (or explicitly null).
    MissingProperty,
    /// Value does not match the required pattern.
    PatternMismatch,
    /// Value rejected by a named format checker.
    IncorrectFormat,
    /// Below the lower numeric bound.
    TooSmall,
    /// Above the upper numeric bound.
    TooLarge,
    /// Longer than the length bound allows.
    TooLong,
    /// Shorter than the length bound allows.
    TooShort,
    /// Outside a closed numeric interval.
    OutOfRange,
    /// Length outside a closed interval.
    WrongLength,
    /// Rejected by a caller-supplied predicate.
    CheckFailed,
    /// Not a member of the allowed set.
    EnumMismatch,
    /// Value is not a sequence.
    NotArray,
}

impl FailureKind {
    /// Built-in message, used when neither a per-step override nor a
    /// process-wide override (see [`crate::messages`]) is present.
    pub fn default_message(&self) -> &'static str {
        match self {
            FailureKind::TypeMismatch => "incorrect type",
            FailureKind::MissingProperty => "missing property",
            FailureKind::PatternMismatch => "regex test failed",
            FailureKind::IncorrectFormat => "incorrect format",
            FailureKind::TooSmall => "too small",
            FailureKind::TooLarge => "too large",
            FailureKind::TooLong => "too long",
            FailureKind::TooShort => "too short",
            FailureKind::OutOfRange => "out of range",
            FailureKind::WrongLength => "incorrect length",
            FailureKind::CheckFailed => "failed check",
            FailureKind::EnumMismatch => "failed enum",
            FailureKind::NotArray => "not array",
        }
    }
}

/// One component of the path from the top-level value down to the
/// offending field: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object field name.
    Key(String),
    /// Array element index.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Parameters of the check that failed, typed per failure category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum FailureContext {
    /// Expected runtime type.
    Type { expected: ValueKind },
    /// Keys the step required or projected.
    Keys { keys: Vec<String> },
    /// Source text of the pattern that did not match.
    Pattern { pattern: String },
    /// Name of the format checker that rejected the value.
    Format { format: String },
    /// Single numeric bound.
    Bound { bound: f64 },
    /// Closed numeric interval.
    Range { min: f64, max: f64 },
    /// Single length bound.
    LengthBound { bound: usize },
    /// Closed length interval.
    LengthRange { min: usize, max: usize },
    /// Allowed member set.
    Enum { allowed: Vec<Value> },
    /// The check carries no reportable parameters (predicates, sequences).
    None,
}

/// A validation failure: the first step that rejected the value, with the
/// parameters of the failed check and the path to the offending field.
///
/// Failures are ordinary return values, never panics; they also implement
/// [`std::error::Error`] so they compose with `?` at call sites.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{}", render(.message, .path))]
pub struct Failure {
    /// Category of the failure.
    pub kind: FailureKind,
    /// Resolved human-readable message.
    pub message: String,
    /// The value the failing step was applied to.
    pub value: Value,
    /// Parameters of the failed check.
    pub context: FailureContext,
    /// Path locating the failure inside nested structures, outermost
    /// segment first. Empty for top-level failures.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub path: Vec<PathSegment>,
}

impl Failure {
    /// Build a failure with an empty path, resolving the message from the
    /// per-step override or the process-wide table.
    pub(crate) fn new(
        kind: FailureKind,
        message: Option<&str>,
        value: Value,
        context: FailureContext,
    ) -> Self {
        Self {
            kind,
            message: message
                .map(str::to_string)
                .unwrap_or_else(|| messages::resolve(kind)),
            value,
            context,
            path: Vec::new(),
        }
    }

    /// Locate the failure at a single path segment.
    pub(crate) fn at(mut self, segment: impl Into<PathSegment>) -> Self {
        self.path = vec![segment.into()];
        self
    }

    /// Prepend an outer segment as the failure unwinds out of a nested
    /// evaluation (outer key first).
    pub(crate) fn prepend(mut self, segment: impl Into<PathSegment>) -> Self {
        self.path.insert(0, segment.into());
        self
    }

    /// Render the path as `user.addresses[2].city`-style text. Empty for
    /// top-level failures.
    pub fn path_string(&self) -> String {
        path_to_string(&self.path)
    }
}

fn path_to_string(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(index) => {
                let _ = write!(out, "[{index}]");
            }
        }
    }
    out
}

fn render(message: &str, path: &[PathSegment]) -> String {
    if path.is_empty() {
        message.to_string()
    } else {
        format!("{} at {}", message, path_to_string(path))
    }
}
