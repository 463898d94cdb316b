//! Process-wide default-message table.
//!
//! Steps built without a per-step [`Schema::message`](crate::Schema::message)
//! override resolve their message from this table at evaluation time, so an
//! override installed here applies to schemas built both before and after
//! the call. This is process-wide configuration state intended for startup;
//! concurrent writers are last-writer-wins with no further guarantee.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;

use crate::schema::FailureKind;

static OVERRIDES: Lazy<RwLock<HashMap<FailureKind, String>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Replace the default message for the given failure kinds, process-wide.
/// Kinds not named keep their current message. Per-step overrides supplied
/// at build time are unaffected.
pub fn set_messages<I, S>(overrides: I)
where
    I: IntoIterator<Item = (FailureKind, S)>,
    S: Into<String>,
{
    let mut table = OVERRIDES.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    for (kind, message) in overrides {
        table.insert(kind, message.into());
    }
}

/// Message for a failure kind: the process-wide override if one is
/// installed, the built-in default otherwise.
pub(crate) fn resolve(kind: FailureKind) -> String {
    let table = OVERRIDES.read().unwrap_or_else(|poisoned| poisoned.into_inner());
    table
        .get(&kind)
        .cloned()
        .unwrap_or_else(|| kind.default_message().to_string())
}
