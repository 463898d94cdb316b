//! Ready-made schemas for common shapes.
//!
//! Thin sugar over [`Schema`]'s primitives; no failure modes beyond what
//! the composed steps produce.

use regex::Regex;

use crate::error::Result;
use crate::schema::{Schema, ValueKind};

/// Object with the given required fields: accepts only objects, projects
/// down to exactly the listed keys (all of them mandatory), then validates
/// each field with its schema.
///
/// ```
/// use serde_json::json;
/// use skema::factory::{object, string};
///
/// let schema = object([("name", string())]);
/// assert_eq!(
///     schema.evaluate(json!({"name": "ada", "extra": 1})).unwrap(),
///     json!({"name": "ada"}),
/// );
/// ```
pub fn object<I, S>(fields: I) -> Schema
where
    I: IntoIterator<Item = (S, Schema)>,
    S: Into<String>,
{
    let fields: Vec<(String, Schema)> = fields
        .into_iter()
        .map(|(key, schema)| (key.into(), schema))
        .collect();
    let keys: Vec<String> = fields.iter().map(|(key, _)| key.clone()).collect();
    Schema::new()
        .type_of(ValueKind::Object)
        .keep(keys)
        .shape(fields)
}

/// Any string.
pub fn string() -> Schema {
    Schema::new().type_of(ValueKind::String)
}

/// String matching a regular expression. The one fallible constructor:
/// fails when the pattern does not compile.
pub fn pattern(pattern: &str) -> Result<Schema> {
    Ok(string().match_pattern(Regex::new(pattern)?))
}

/// String in email shape.
pub fn email() -> Schema {
    string().format_as("email")
}

/// Any number.
pub fn number() -> Schema {
    Schema::new().type_of(ValueKind::Number)
}

/// Number with no fractional part.
pub fn integer() -> Schema {
    number().format_as("integer")
}

/// Number within the closed interval `[min, max]`.
pub fn bounded_number(min: f64, max: f64) -> Schema {
    number().range(min, max)
}

/// String parseable as a date.
pub fn date() -> Schema {
    string().format_as("date")
}

/// Any array.
pub fn array() -> Schema {
    Schema::new().is_array()
}

/// Array whose every element has the given runtime type. Element failures
/// are reported with the index as the path segment.
pub fn array_of(element: ValueKind) -> Schema {
    array().each(move || Schema::new().type_of(element))
}
