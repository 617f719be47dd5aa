//! Error types for the command execution pipeline.

use crate::action::{
    ActionError, ActionTransition, ConsumePotionAction, CraftAction, DestroySpawnerAction,
    MoveAction, MoveOlderPlayerAction, PlaceBombAction, SpawnAction,
};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing a command through the dungeon engine.
///
/// A failed command leaves the dungeon exactly as it was before execution.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("move failed: {0}")]
    Move(TransitionPhaseError<<MoveAction as ActionTransition>::Error>),

    #[error("place bomb failed: {0}")]
    PlaceBomb(TransitionPhaseError<<PlaceBombAction as ActionTransition>::Error>),

    #[error("consume potion failed: {0}")]
    ConsumePotion(TransitionPhaseError<<ConsumePotionAction as ActionTransition>::Error>),

    #[error("craft failed: {0}")]
    Craft(TransitionPhaseError<<CraftAction as ActionTransition>::Error>),

    #[error("destroy spawner failed: {0}")]
    DestroySpawner(TransitionPhaseError<<DestroySpawnerAction as ActionTransition>::Error>),

    #[error("spawn failed: {0}")]
    Spawn(TransitionPhaseError<<SpawnAction as ActionTransition>::Error>),

    #[error("older player move failed: {0}")]
    MoveOlderPlayer(TransitionPhaseError<<MoveOlderPlayerAction as ActionTransition>::Error>),
}

impl ExecuteError {
    fn phase_error(&self) -> &TransitionPhaseError<ActionError> {
        match self {
            Self::Move(error)
            | Self::PlaceBomb(error)
            | Self::ConsumePotion(error)
            | Self::Craft(error)
            | Self::DestroySpawner(error)
            | Self::Spawn(error)
            | Self::MoveOlderPlayer(error) => error,
        }
    }

    /// The stage that rejected the command.
    pub fn phase(&self) -> TransitionPhase {
        self.phase_error().phase
    }

    /// The underlying command error.
    pub fn action_error(&self) -> &ActionError {
        &self.phase_error().error
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        self.action_error().severity()
    }

    fn error_code(&self) -> &'static str {
        self.action_error().error_code()
    }
}
