//! Errors raised by machine operations.

use crate::core::{Key, StateKey};
use thiserror::Error;

/// Reasons a machine operation was rejected.
///
/// None of these are fatal. `request`, `add_state` and friends log them and
/// answer `None` or `false`; the `try_` variants return them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FsmError<K: StateKey> {
    #[error("{operation} cannot be called during the transition from '{from}' to '{to}'")]
    InTransition {
        operation: &'static str,
        from: Key<K>,
        to: Key<K>,
    },

    #[error("{operation} cannot be called from a filter (state: '{state}')")]
    InFilter {
        operation: &'static str,
        state: Key<K>,
    },

    #[error("transition from '{from}' to '{requested}' has been denied")]
    Denied { from: Key<K>, requested: Key<K> },

    #[error("filter for '{state}' returned a malformed result")]
    MalformedFilterResult { state: Key<K> },

    #[error("state '{0}' doesn't exist")]
    UnknownState(K),

    #[error("current state '{0}' cannot be removed")]
    RemoveCurrent(K),

    #[error("the Off state cannot be removed")]
    RemoveOff,

    #[error("from-to function from '{from}' to '{to}' doesn't exist")]
    UnknownFromTo { from: K, to: K },

    #[error("current state '{0}' is missing from the new state set")]
    CurrentStateDropped(K),

    #[error("there are no states to cycle through")]
    NoStates,
}
