//! Checkpoint and resume functionality for machines.
//!
//! Callbacks cannot be serialized, so a [`Snapshot`] only records where a
//! machine is and what it went through. Resuming puts a freshly configured
//! machine back at that position without running any callback.

use crate::core::{Key, StateKey, Status, TransitionHistory};
use crate::machine::Fsm;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable picture of a machine at rest.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot<K> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    pub name: String,
    pub serial: u64,

    /// State the machine was in
    pub current: Key<K>,

    /// Registered state keys, in order
    pub states: Vec<K>,

    /// Ordered pairs with a from-to function
    pub from_to: Vec<(K, K)>,

    pub broadcast: bool,

    pub history: TransitionHistory<K>,
}

impl<K: Serialize + DeserializeOwned> Snapshot<K> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }
}

impl<K: StateKey> Fsm<K> {
    /// Capture the machine's position, configuration outline and history.
    ///
    /// Fails while a transition is running.
    pub fn snapshot(&self) -> Result<Snapshot<K>, CheckpointError> {
        self.with_inner(|inner| {
            let current = match &inner.status {
                Status::InTransition { from, to } => {
                    return Err(CheckpointError::InTransition {
                        name: self.name().to_string(),
                        from: from.to_string(),
                        to: to.to_string(),
                    })
                }
                Status::Off => Key::Off,
                Status::Active(key) => Key::State(key.clone()),
            };

            Ok(Snapshot {
                version: SNAPSHOT_VERSION,
                id: Uuid::new_v4(),
                timestamp: Utc::now(),
                name: self.name().to_string(),
                serial: self.serial(),
                current,
                states: inner.states.keys().cloned().collect(),
                from_to: inner.from_to.keys().cloned().collect(),
                broadcast: inner.broadcast,
                history: inner.history.clone(),
            })
        })
    }

    /// Put the machine where `snapshot` left off.
    ///
    /// The machine must be Off and must already have every state the
    /// snapshot lists. Restores the current state, the broadcast flag and the
    /// history. No enter function runs and nothing is broadcast.
    pub fn resume(&self, snapshot: &Snapshot<K>) -> Result<(), CheckpointError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        self.with_inner_mut(|inner| {
            if inner.status != Status::Off {
                return Err(CheckpointError::NotOff {
                    name: self.name().to_string(),
                    current: inner.status.to_string(),
                });
            }
            let missing = snapshot
                .states
                .iter()
                .chain(snapshot.current.state())
                .find(|key| !inner.states.contains(key));
            if let Some(missing) = missing {
                return Err(CheckpointError::MissingState(missing.to_string()));
            }

            inner.status = Status::from(snapshot.current.clone());
            inner.broadcast = snapshot.broadcast;
            inner.history = snapshot.history.clone();
            tracing::debug!(
                fsm = %self.name(),
                serial = self.serial(),
                snapshot = %snapshot.id,
                state = %snapshot.current,
                "machine resumed"
            );
            Ok(())
        })
    }
}
