//! Where a machine currently is.

use super::key::{Key, StateKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The position of a machine.
///
/// A machine is either settled (`Off` or `Active`) or in the midst of a
/// transition. While transitioning, enter/exit/from-to callbacks run and
/// both endpoints are known.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Status<K> {
    /// The implicit startup state.
    Off,
    /// Settled in a registered state.
    Active(K),
    /// Running the callbacks of a transition.
    InTransition { from: Key<K>, to: Key<K> },
}

impl<K: StateKey> Status<K> {
    /// The settled key, or the destination while transitioning.
    pub fn current_or_next(&self) -> Key<K> {
        match self {
            Self::Off => Key::Off,
            Self::Active(key) => Key::State(key.clone()),
            Self::InTransition { to, .. } => to.clone(),
        }
    }

    pub fn is_in_transition(&self) -> bool {
        matches!(self, Self::InTransition { .. })
    }

    /// Check if the machine is settled in exactly this key.
    pub fn is_at(&self, key: &Key<K>) -> bool {
        match (self, key) {
            (Self::Off, Key::Off) => true,
            (Self::Active(current), Key::State(key)) => current == key,
            _ => false,
        }
    }
}

impl<K> From<Key<K>> for Status<K> {
    fn from(key: Key<K>) -> Self {
        match key {
            Key::Off => Self::Off,
            Key::State(key) => Self::Active(key),
        }
    }
}

impl<K: fmt::Display> fmt::Display for Status<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("<Off>"),
            Self::Active(key) => key.fmt(f),
            Self::InTransition { from, to } => write!(f, "<{from} -> {to}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_statuses_report_their_key() {
        assert_eq!(Status::<&str>::Off.current_or_next(), Key::Off);
        assert_eq!(Status::Active("A").current_or_next(), Key::State("A"));
        assert!(!Status::Active("A").is_in_transition());
    }

    #[test]
    fn transition_exposes_destination() {
        let status = Status::InTransition {
            from: Key::State("A"),
            to: Key::Off,
        };
        assert!(status.is_in_transition());
        assert_eq!(status.current_or_next(), Key::Off);
    }

    #[test]
    fn is_at_matches_only_settled_positions() {
        let active = Status::Active("A");
        assert!(active.is_at(&Key::State("A")));
        assert!(!active.is_at(&Key::State("B")));
        assert!(!active.is_at(&Key::Off));

        let moving = Status::InTransition {
            from: Key::State("A"),
            to: Key::State("B"),
        };
        assert!(!moving.is_at(&Key::State("A")));
        assert!(!moving.is_at(&Key::State("B")));
    }

    #[test]
    fn status_from_key_round_trips() {
        assert_eq!(Status::from(Key::<&str>::Off), Status::Off);
        assert_eq!(Status::from(Key::State("A")), Status::Active("A"));
    }

    #[test]
    fn display_formats_transitions() {
        let status = Status::InTransition {
            from: Key::Off,
            to: Key::State("A"),
        };
        assert_eq!(status.to_string(), "<<Off> -> A>");
    }
}
