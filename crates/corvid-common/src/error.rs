//! Error types shared across the Corvid crates.

use crate::ids::EntityId;
use thiserror::Error;

/// Top-level error type for Corvid operations.
#[derive(Debug, Error)]
pub enum CorvidError {
    /// An animation was constructed with no frames or a non-positive
    /// frame duration.
    #[error("Invalid animation: {0}")]
    InvalidAnimation(&'static str),

    /// A state machine was asked to enter a state it has no entry for.
    #[error("Unhandled entity state: {0}")]
    UnhandledState(String),

    /// A named content resource failed to load.
    #[error("Content load failed: {0}")]
    ContentLoad(String),

    /// Entity not found
    #[error("Entity not found: {0:?}")]
    EntityNotFound(EntityId),
}

/// Result type alias for Corvid operations.
pub type CorvidResult<T> = Result<T, CorvidError>;
