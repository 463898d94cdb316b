//! Error types for schema construction.
//!
//! Validation failures are not errors in this sense: [`Schema::evaluate`]
//! (crate::Schema::evaluate) reports them as ordinary
//! [`Failure`](crate::Failure) values. `SkemaError` covers the fallible
//! construction paths of the factory layer.

use thiserror::Error;

/// Error building a schema.
#[derive(Debug, Error)]
pub enum SkemaError {
    /// The supplied pattern is not a valid regular expression.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Result type alias for fallible schema construction.
pub type Result<T> = std::result::Result<T, SkemaError>;
