//! Command execution pipeline.
//!
//! The [`DungeonEngine`] is the authoritative reducer for [`DungeonState`].
//! It drives commands through the transition phases, restores the state when
//! a phase fails, and surfaces rich error information to the caller.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use tracing::warn;

use crate::action::{Command, CommandOutcome, MoveOlderPlayerAction, OlderPlayerOutcome, SpawnAction};
use crate::env::DungeonEnv;
use crate::error::GameError;
use crate::state::{Direction, DungeonState, EntityId};

/// Dungeon engine that owns command execution for one borrowed state.
///
/// All mutations flow through the three-phase pipeline:
/// pre_validate → apply → post_validate
///
/// A command either commits in full or leaves the state untouched.
pub struct DungeonEngine<'a> {
    state: &'a mut DungeonState,
}

impl<'a> DungeonEngine<'a> {
    pub fn new(state: &'a mut DungeonState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &DungeonState {
        self.state
    }

    /// Executes a player command.
    pub fn execute(
        &mut self,
        env: DungeonEnv<'_>,
        command: &Command,
    ) -> Result<CommandOutcome, ExecuteError> {
        self.atomically(command.as_str(), |state| {
            transition::execute_command(command, state, &env)
        })
    }

    /// Asks a spawner for one zombie toast. The caller decides the cadence.
    pub fn spawn(&mut self, spawner: EntityId) -> Result<Option<EntityId>, ExecuteError> {
        self.atomically("spawn", |state| {
            transition::drive_transition(&SpawnAction::new(spawner), state, &DungeonEnv::inert())
                .map_err(ExecuteError::Spawn)
        })
    }

    /// Moves an older-player echo. It cannot push boulders or open doors.
    pub fn move_older_player(
        &mut self,
        older: EntityId,
        direction: Direction,
    ) -> Result<OlderPlayerOutcome, ExecuteError> {
        self.atomically("move_older_player", |state| {
            transition::drive_transition(
                &MoveOlderPlayerAction::new(older, direction),
                state,
                &DungeonEnv::inert(),
            )
            .map_err(ExecuteError::MoveOlderPlayer)
        })
    }

    fn atomically<T>(
        &mut self,
        command: &'static str,
        run: impl FnOnce(&mut DungeonState) -> Result<T, ExecuteError>,
    ) -> Result<T, ExecuteError> {
        let before = self.state.clone();

        let result = run(self.state).inspect_err(|error| {
            warn!(
                command,
                phase = error.phase().as_str(),
                code = error.error_code(),
                severity = error.severity().as_str(),
                %error,
                "command rejected"
            );
            *self.state = before;
        });
        if result.is_ok() {
            self.state.latch_goals();
        }
        result
    }
}
