//! State management errors.
//!
//! Errors raised by the entity registry and dungeon construction. They
//! indicate a broken invariant rather than an invalid player command.

use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// An entity with this id is already registered.
    #[error("entity {id} is already registered")]
    DuplicateEntity { id: EntityId },

    /// No entity with this id is registered.
    #[error("entity {id} is not registered")]
    UnknownEntity { id: EntityId },

    /// A switch flag disagrees with the triggered set or the boulder on its tile.
    #[error("switch {id} is out of sync with its tile")]
    SwitchDesync { id: EntityId },

    /// The player may carry at most one key.
    #[error("player already holds a key, cannot also start with key {key_id}")]
    ExtraKey { key_id: u32 },

    /// Entity id allocation overflow (all ids exhausted).
    #[error("entity id overflow (current: {current})")]
    EntityIdOverflow { current: u32 },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            DuplicateEntity { .. } => "STATE_DUPLICATE_ENTITY",
            UnknownEntity { .. } => "STATE_UNKNOWN_ENTITY",
            SwitchDesync { .. } => "STATE_SWITCH_DESYNC",
            ExtraKey { .. } => "STATE_EXTRA_KEY",
            EntityIdOverflow { .. } => "STATE_ENTITY_ID_OVERFLOW",
        }
    }
}
