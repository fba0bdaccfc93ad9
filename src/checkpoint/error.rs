//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A snapshot cannot be taken mid-transition
    #[error("Machine '{name}' is transitioning from '{from}' to '{to}'")]
    InTransition {
        name: String,
        from: String,
        to: String,
    },

    /// Only a machine that is Off can be resumed
    #[error("Machine '{name}' must be Off to resume, but is in '{current}'")]
    NotOff { name: String, current: String },

    /// The snapshot names a state the machine does not have
    #[error("Snapshot state '{0}' is not registered")]
    MissingState(String),
}
