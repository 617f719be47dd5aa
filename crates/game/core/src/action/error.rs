//! Command execution errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, StateError};

use super::craft::Recipe;

/// Errors a player or system command can fail with.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The command is not legal in the current state.
    #[error("invalid action: {reason}")]
    InvalidAction { reason: &'static str },

    /// A crafting recipe is missing ingredients.
    #[error("insufficient resources to craft {recipe}")]
    InsufficientResources { recipe: Recipe },

    /// The referenced entity does not exist (or is not held by the player).
    #[error("no such entity {0}")]
    NoSuchEntity(EntityId),

    /// The registry rejected a commit.
    #[error(transparent)]
    State(#[from] StateError),
}

impl ActionError {
    pub fn invalid(reason: &'static str) -> Self {
        Self::InvalidAction { reason }
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientResources { .. } => ErrorSeverity::Recoverable,
            Self::InvalidAction { .. } | Self::NoSuchEntity(_) => ErrorSeverity::Validation,
            Self::State(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAction { .. } => "ACTION_INVALID",
            Self::InsufficientResources { .. } => "ACTION_INSUFFICIENT_RESOURCES",
            Self::NoSuchEntity(_) => "ACTION_NO_SUCH_ENTITY",
            Self::State(error) => error.error_code(),
        }
    }
}
