//! Command dispatch through the transition pipeline.

use crate::action::{
    ActionTransition, Command, CommandOutcome, ConsumePotionAction, CraftAction,
    DestroySpawnerAction, MoveAction, PlaceBombAction,
};
use crate::env::DungeonEnv;
use crate::state::DungeonState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the dungeon state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
pub(super) fn drive_transition<T>(
    transition: &T,
    state: &mut DungeonState,
    env: &DungeonEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes a player command to its transition.
pub(super) fn execute_command(
    command: &Command,
    state: &mut DungeonState,
    env: &DungeonEnv<'_>,
) -> Result<CommandOutcome, ExecuteError> {
    match *command {
        Command::Move(direction) => {
            drive_transition(&MoveAction::new(direction), state, env)
                .map(CommandOutcome::Move)
                .map_err(ExecuteError::Move)
        }
        Command::PlaceBomb(bomb) => drive_transition(&PlaceBombAction::new(bomb), state, env)
            .map(CommandOutcome::PlaceBomb)
            .map_err(ExecuteError::PlaceBomb),
        Command::ConsumePotion(potion) => {
            drive_transition(&ConsumePotionAction::new(potion), state, env)
                .map(CommandOutcome::ConsumePotion)
                .map_err(ExecuteError::ConsumePotion)
        }
        Command::Craft(recipe) => drive_transition(&CraftAction::new(recipe), state, env)
            .map(CommandOutcome::Craft)
            .map_err(ExecuteError::Craft),
        Command::DestroySpawner(spawner) => {
            drive_transition(&DestroySpawnerAction::new(spawner), state, env)
                .map(|()| CommandOutcome::DestroySpawner)
                .map_err(ExecuteError::DestroySpawner)
        }
    }
}
