//! The fluent validation pipeline.

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

use super::failure::Failure;
use super::step::Step;
use super::value::ValueKind;

/// An ordered pipeline of validation steps.
///
/// Each builder method appends exactly one step and returns the schema for
/// further chaining; step order is fixed once appended. Evaluation threads
/// the value through the steps in declaration order and stops at the first
/// failure. A built schema is stateless across evaluations and can be
/// reused any number of times.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use skema::{Schema, ValueKind};
///
/// let username = Schema::new()
///     .type_of(ValueKind::String)
///     .range_length(3, 16);
///
/// assert!(username.evaluate(json!("ada")).is_ok());
/// assert!(username.evaluate(json!("ab")).is_err());
/// assert!(username.evaluate(json!(42)).is_err());
/// ```
#[derive(Debug, Default)]
pub struct Schema {
    steps: Vec<Step>,
}

impl Schema {
    /// An empty pipeline. Evaluating it returns the input unchanged.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    fn push(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Require the value's runtime type tag to be `expected`.
    pub fn type_of(self, expected: ValueKind) -> Self {
        self.push(Step::TypeOf { expected, message: None })
    }

    /// Require every listed key to be present (and non-null). The first
    /// missing key is reported at `path=[key]`.
    pub fn require_keys<I, S>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Step::RequireKeys {
            keys: keys.into_iter().map(Into::into).collect(),
            message: None,
        })
    }

    /// Reject the value when `predicate` returns false.
    pub fn check(self, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.push(Step::Check { predicate: Box::new(predicate), message: None })
    }

    /// Replace the value with `transform(value)`. Never fails.
    pub fn alter(self, transform: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.push(Step::Alter { transform: Box::new(transform) })
    }

    /// Require the value to be a string matching `pattern`.
    pub fn match_pattern(self, pattern: Regex) -> Self {
        self.push(Step::MatchPattern { pattern, message: None })
    }

    /// Validate each listed field that is present with its own schema,
    /// writing the (possibly transformed) result back. Absent or null
    /// fields are skipped; combine with [`Schema::keep`] or
    /// [`Schema::require_keys`] to make fields mandatory.
    pub fn shape<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Schema)>,
        S: Into<String>,
    {
        let fields: IndexMap<String, Schema> = fields
            .into_iter()
            .map(|(key, schema)| (key.into(), schema))
            .collect();
        self.push(Step::Shape { fields })
    }

    /// Require every listed key and project the value down to exactly
    /// those keys. This is a transforming step: unlisted keys are dropped.
    pub fn keep<I, S>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Step::Keep {
            keys: keys.into_iter().map(Into::into).collect(),
            message: None,
        })
    }

    /// Require the value to equal one of `allowed`.
    pub fn enum_of(self, allowed: impl IntoIterator<Item = Value>) -> Self {
        self.push(Step::EnumOf {
            allowed: allowed.into_iter().collect(),
            message: None,
        })
    }

    /// Require the value to be an array.
    pub fn is_array(self) -> Self {
        self.push(Step::IsArray { message: None })
    }

    /// Validate every element (array) or entry (object) with a fresh
    /// schema obtained from `element`, writing results back in place.
    /// Failures are reported with the index or key prepended to the path.
    pub fn each(self, element: impl Fn() -> Schema + Send + Sync + 'static) -> Self {
        self.push(Step::Each { element: Box::new(element) })
    }

    /// Dispatch to the format checker registered under `name` (see
    /// [`crate::format`]). Unregistered names pass the value through.
    pub fn format_as(self, name: impl Into<String>) -> Self {
        self.push(Step::Format { name: name.into(), message: None })
    }

    /// Reject numbers below `bound`. Non-numeric values pass.
    pub fn min(self, bound: f64) -> Self {
        self.push(Step::Min { bound, message: None })
    }

    /// Reject numbers above `bound`. Non-numeric values pass.
    pub fn max(self, bound: f64) -> Self {
        self.push(Step::Max { bound, message: None })
    }

    /// Reject strings/arrays shorter than `bound`.
    pub fn min_length(self, bound: usize) -> Self {
        self.push(Step::MinLength { bound, message: None })
    }

    /// Reject strings/arrays longer than `bound`.
    pub fn max_length(self, bound: usize) -> Self {
        self.push(Step::MaxLength { bound, message: None })
    }

    /// Reject numbers outside the closed interval `[min, max]`.
    pub fn range(self, min: f64, max: f64) -> Self {
        self.push(Step::Range { min, max, message: None })
    }

    /// Reject strings/arrays whose length is outside `[min, max]`.
    pub fn range_length(self, min: usize, max: usize) -> Self {
        self.push(Step::RangeLength { min, max, message: None })
    }

    /// Override the failure message of the most recently appended step,
    /// taking precedence over the process-wide table. No effect on an
    /// empty pipeline or on steps that never fail themselves.
    pub fn message(mut self, text: impl Into<String>) -> Self {
        if let Some(step) = self.steps.last_mut() {
            step.set_message(text.into());
        }
        self
    }

    /// Number of steps in the pipeline.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when the pipeline has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run `value` through the pipeline: apply each step in declaration
    /// order, threading the (possibly transformed) value between them, and
    /// return the first failure, if any. No step after a failing one runs.
    pub fn evaluate(&self, value: Value) -> Result<Value, Failure> {
        let mut current = value;
        for step in &self.steps {
            current = step.apply(current)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use serde_json::json;

    use super::*;
    use crate::schema::{FailureKind, PathSegment};

    #[test]
    fn empty_pipeline_returns_the_value_unchanged() {
        let schema = Schema::new();
        let input = json!({"anything": [1, "two", null]});
        assert_eq!(schema.evaluate(input.clone()).unwrap(), input);
    }

    #[test]
    fn evaluation_stops_at_the_first_failure() {
        let touched = Arc::new(AtomicBool::new(false));
        let witness = Arc::clone(&touched);
        let schema = Schema::new()
            .type_of(ValueKind::Number)
            .check(move |_| {
                witness.store(true, Ordering::SeqCst);
                true
            });

        let failure = schema.evaluate(json!("not a number")).unwrap_err();
        assert_eq!(failure.kind, FailureKind::TypeMismatch);
        assert!(!touched.load(Ordering::SeqCst), "step after the failure ran");

        schema.evaluate(json!(1)).unwrap();
        assert!(touched.load(Ordering::SeqCst));
    }

    #[test]
    fn alter_threads_the_transformed_value_to_later_steps() {
        let schema = Schema::new()
            .alter(|value| json!(value.as_i64().unwrap_or(0) * 2))
            .max(10.0);

        assert_eq!(schema.evaluate(json!(4)).unwrap(), json!(8));
        assert_eq!(schema.evaluate(json!(6)).unwrap_err().kind, FailureKind::TooLarge);
    }

    #[test]
    fn schemas_are_reusable_across_evaluations() {
        let schema = Schema::new().type_of(ValueKind::String).min_length(2);
        assert!(schema.evaluate(json!("ok")).is_ok());
        assert!(schema.evaluate(json!("x")).is_err());
        assert!(schema.evaluate(json!("still ok")).is_ok());
    }

    #[test]
    fn per_step_message_overrides_apply_to_the_last_step_only() {
        let schema = Schema::new()
            .type_of(ValueKind::String)
            .min_length(5)
            .message("name is too short");

        let failure = schema.evaluate(json!(3)).unwrap_err();
        assert_eq!(failure.message, "incorrect type");

        let failure = schema.evaluate(json!("abc")).unwrap_err();
        assert_eq!(failure.message, "name is too short");
    }

    #[test]
    fn message_on_an_empty_pipeline_is_a_no_op() {
        let schema = Schema::new().message("never used");
        assert!(schema.is_empty());
        assert!(schema.evaluate(json!(null)).is_ok());
    }

    #[test]
    fn nested_paths_accumulate_outer_to_inner() {
        let inner = Schema::new().shape([("b", Schema::new().type_of(ValueKind::String))]);
        let outer = Schema::new().shape([("a", inner)]);

        let failure = outer.evaluate(json!({"a": {"b": 5}})).unwrap_err();
        assert_eq!(failure.kind, FailureKind::TypeMismatch);
        assert_eq!(
            failure.path,
            vec![PathSegment::from("a"), PathSegment::from("b")]
        );
    }
}
