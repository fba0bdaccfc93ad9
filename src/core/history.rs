//! Committed transition history.
//!
//! Every transition a machine commits is recorded here, oldest first, up to
//! a configurable number of records.

use super::key::{Key, StateKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// What started a transition.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TransitionCause {
    /// Accepted by a filter (`request`, `demand`, `request_next`, ...).
    Request,
    /// Unconditional, filters bypassed.
    Force,
    /// Sent back to Off by `cleanup`.
    Cleanup,
}

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use ely_fsm::core::{Key, TransitionCause, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     sequence: 1,
///     from: Key::Off,
///     to: Key::State("Idle"),
///     cause: TransitionCause::Request,
///     timestamp: Utc::now(),
/// };
/// assert!(record.from.is_off());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord<K> {
    /// Position of this transition among all transitions of the machine,
    /// starting at 1.
    pub sequence: u64,
    /// The state being left
    pub from: Key<K>,
    /// The state being entered
    pub to: Key<K>,
    pub cause: TransitionCause,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered history of committed transitions.
///
/// Once `limit` records are stored, recording a new one drops the oldest.
/// A limit of zero disables recording; the sequence counter keeps running
/// either way.
///
/// # Example
///
/// ```rust
/// use ely_fsm::core::{Key, TransitionCause, TransitionHistory};
///
/// let mut history = TransitionHistory::with_limit(8);
/// history.record(Key::Off, Key::State("A"), TransitionCause::Request);
/// history.record(Key::State("A"), Key::State("B"), TransitionCause::Force);
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&Key::Off, &Key::State("A"), &Key::State("B")]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionHistory<K> {
    limit: usize,
    committed: u64,
    records: VecDeque<TransitionRecord<K>>,
}

impl<K: StateKey> TransitionHistory<K> {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            committed: 0,
            records: VecDeque::new(),
        }
    }

    /// Record a committed transition and return its sequence number.
    pub fn record(&mut self, from: Key<K>, to: Key<K>, cause: TransitionCause) -> u64 {
        self.committed += 1;
        if self.limit == 0 {
            return self.committed;
        }
        while self.records.len() >= self.limit {
            self.records.pop_front();
        }
        self.records.push_back(TransitionRecord {
            sequence: self.committed,
            from,
            to,
            cause,
            timestamp: Utc::now(),
        });
        self.committed
    }

    /// Get the path of states traversed by the retained records.
    ///
    /// Returns the `from` key of the oldest record, then the `to` key of
    /// each record in order. Empty when nothing is retained.
    pub fn get_path(&self) -> Vec<&Key<K>> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// Time between the oldest and newest retained records.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.front(), self.records.back()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    /// Retained records, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &TransitionRecord<K>> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord<K>> {
        self.records.back()
    }

    /// Total number of transitions recorded, including dropped ones.
    pub fn committed(&self) -> u64 {
        self.committed
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
