//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself (closed channels, unknown ids) and by the
//! snapshot backends that give an actor's store its durability.

use std::path::PathBuf;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's own error type from an [`FrameworkError::EntityError`].
    ///
    /// Clients use this to hand domain errors (e.g. a validation failure raised in
    /// `from_create_params`) back to their callers unchanged instead of flattening them
    /// into a string.
    pub fn downcast_entity<E: std::error::Error + 'static>(self) -> Result<E, Self> {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(e) => Ok(*e),
                Err(inner) => Err(FrameworkError::EntityError(inner)),
            },
            other => Err(other),
        }
    }
}

/// Errors raised by a [`SnapshotStore`](crate::snapshot::SnapshotStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Snapshot key is not usable as a file name: {0:?}")]
    InvalidKey(String),
    #[error("Snapshot I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
