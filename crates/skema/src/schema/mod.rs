//! Validation pipeline core: runtime type tags, failures, atomic steps,
//! and the fluent [`Schema`] builder.

mod failure;
mod pipeline;
mod step;
mod value;

pub use failure::{Failure, FailureContext, FailureKind, PathSegment};
pub use pipeline::Schema;
pub use value::ValueKind;
