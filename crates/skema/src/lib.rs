//! Skema: composable runtime validation pipelines for JSON-like values.
//!
//! A [`Schema`] is an ordered pipeline of atomic checks built through a
//! fluent chain. Evaluation threads the value through the steps in
//! declaration order, short-circuits on the first failure, and reports that
//! failure with a path back to the exact offending field. Steps can also
//! transform the value as it flows through, so a successful evaluation
//! yields the validated (possibly rewritten) value.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use skema::factory::{email, object, string};
//!
//! let schema = object([
//!     ("email", email()),
//!     ("name", string().range_length(10, 20)),
//! ]);
//!
//! let value = schema
//!     .evaluate(json!({ "email": "hello@asdf.ca", "name": "basdfaasdfasdf" }))
//!     .unwrap();
//! assert_eq!(value["email"], "hello@asdf.ca");
//!
//! let failure = schema
//!     .evaluate(json!({ "email": "hello@asdf.ca", "name": "short" }))
//!     .unwrap_err();
//! assert_eq!(failure.path_string(), "name");
//! ```

pub mod error;
pub mod factory;
pub mod format;
pub mod messages;
pub mod schema;

pub use error::SkemaError;
pub use format::{FormatChecker, register_format};
pub use messages::set_messages;
pub use schema::{Failure, FailureContext, FailureKind, PathSegment, Schema, ValueKind};
