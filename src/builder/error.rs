//! Build errors for machine builders.

use crate::core::StateKey;
use thiserror::Error;

/// Problems found while validating a machine description.
///
/// The builder reports every problem it finds, not just the first.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError<K: StateKey> {
    #[error("Machine name not specified. Call .name(name) before .build()")]
    MissingName,

    #[error("State '{0}' is defined more than once")]
    DuplicateState(K),

    #[error("From-to function from '{from}' to '{to}' is defined more than once")]
    DuplicateFromTo { from: K, to: K },

    #[error("From-to function from '{from}' to '{to}' names undefined state '{missing}'")]
    UnknownFromToState { from: K, to: K, missing: K },

    #[error("State '{state}' allows undefined destination '{destination}'")]
    UnknownDestination { state: K, destination: K },
}
