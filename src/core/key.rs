//! State keys and the reserved `Off`/`Null` markers.
//!
//! A machine is parametrized over an arbitrary key type `K`. The reserved
//! positions a machine needs (the implicit startup state and the "no state"
//! answer of a denied request) are not carved out of `K`: they are separate
//! variants and types, so no user key can ever collide with them.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};

/// Trait for state key types.
///
/// Keys must be totally ordered (states are kept sorted by key, which is what
/// `request_next`/`request_prev` walk), printable for diagnostics, and
/// shareable across threads.
///
/// The trait is implemented for every type meeting the bounds, so
/// `&'static str`, `String`, integers and plain enums all work directly.
///
/// # Example
///
/// ```rust
/// use ely_fsm::core::StateKey;
///
/// fn takes_key<K: StateKey>(_key: K) {}
///
/// takes_key("Walking");
/// takes_key(String::from("Running"));
/// takes_key(42u32);
/// ```
pub trait StateKey: Clone + Ord + Debug + Display + Send + Sync + 'static {}

impl<T> StateKey for T where T: Clone + Ord + Debug + Display + Send + Sync + 'static {}

/// The source or destination of a transition.
///
/// Every machine starts in `Off` and can always be sent back to it; `Off`
/// never needs to be registered.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Key<K> {
    /// The implicit initial and terminal state.
    Off,
    /// A registered, user-defined state.
    State(K),
}

impl<K> Key<K> {
    /// Check if this is the `Off` state.
    pub fn is_off(&self) -> bool {
        matches!(self, Self::Off)
    }

    /// The user key, if this is not `Off`.
    pub fn state(&self) -> Option<&K> {
        match self {
            Self::Off => None,
            Self::State(key) => Some(key),
        }
    }

    /// Consume the key, returning the user key if this is not `Off`.
    pub fn into_state(self) -> Option<K> {
        match self {
            Self::Off => None,
            Self::State(key) => Some(key),
        }
    }
}

impl<K> From<K> for Key<K> {
    fn from(key: K) -> Self {
        Self::State(key)
    }
}

impl<K: Display> Display for Key<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("<Off>"),
            Self::State(key) => Display::fmt(key, f),
        }
    }
}

/// Marker for "no state".
///
/// A filter puts `Null` at the front of its returned list to deny a
/// request. Public request methods express the same answer as `None`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Null;

impl Display for Null {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<Null>")
    }
}
