//! Named format checkers.
//!
//! [`Schema::format_as`](crate::Schema::format_as) dispatches by name into
//! this registry. `integer`, `date`, and `email` are built in; callers can
//! add their own with [`register_format`]. An unregistered name makes the
//! step a silent pass-through rather than an error.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// A named well-formedness check. Returns true when the value conforms.
pub type FormatChecker = fn(&Value) -> bool;

// Local part, '@', then dot-separated domain labels with at least one dot.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .unwrap()
});

/// Date layouts accepted by the `date` checker, beyond RFC 3339.
const DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d", // ISO date
    "%m/%d/%Y", // US date
    "%d-%m-%Y", // European date
    "%Y/%m/%d", // Alt ISO
];

const DATETIME_LAYOUTS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

fn check_integer(value: &Value) -> bool {
    match value {
        Value::Number(number) => {
            number.is_i64()
                || number.is_u64()
                || number.as_f64().is_some_and(|n| n.fract() == 0.0)
        }
        _ => false,
    }
}

fn check_date(value: &Value) -> bool {
    let Some(text) = value.as_str() else {
        return false;
    };
    if DateTime::parse_from_rfc3339(text).is_ok() {
        return true;
    }
    if DATE_LAYOUTS
        .iter()
        .any(|layout| NaiveDate::parse_from_str(text, layout).is_ok())
    {
        return true;
    }
    DATETIME_LAYOUTS
        .iter()
        .any(|layout| NaiveDateTime::parse_from_str(text, layout).is_ok())
}

fn check_email(value: &Value) -> bool {
    value.as_str().is_some_and(|text| EMAIL_PATTERN.is_match(text))
}

static REGISTRY: Lazy<RwLock<HashMap<String, FormatChecker>>> = Lazy::new(|| {
    let mut checkers: HashMap<String, FormatChecker> = HashMap::new();
    checkers.insert("integer".to_string(), check_integer);
    checkers.insert("date".to_string(), check_date);
    checkers.insert("email".to_string(), check_email);
    RwLock::new(checkers)
});

/// Register (or replace) a format checker under the given name,
/// process-wide. Schemas already built with `format_as(name)` pick up the
/// new checker on their next evaluation.
pub fn register_format(name: impl Into<String>, checker: FormatChecker) {
    let mut registry = REGISTRY.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.insert(name.into(), checker);
}

/// Checker registered under `name`, if any.
pub(crate) fn lookup(name: &str) -> Option<FormatChecker> {
    let registry = REGISTRY.read().unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.get(name).copied()
}
