//! Player and system commands.
//!
//! Every command is a small value type implementing [`ActionTransition`].
//! The engine drives it through `pre_validate → apply → post_validate`.
//!
//! # Module Structure
//!
//! - `movement`: player moves, combat on arrival, the potion clock, older-player echoes
//! - `inventory`: placing bombs and drinking potions
//! - `craft`: recipes and crafting
//! - `spawner`: spawning zombie toasts and destroying spawners
//! - `error`: [`ActionError`]

pub mod craft;
pub mod error;
pub mod inventory;
pub mod movement;
pub mod spawner;

pub use craft::{CraftAction, Recipe};
pub use error::ActionError;
pub use inventory::{ConsumePotionAction, PlaceBombAction, PlaceBombOutcome};
pub use movement::{
    BattleReport, MoveAction, MoveOlderPlayerAction, MoveOutcome, MovePlan, MoveResolution,
    OlderPlayerOutcome, plan_move,
};
pub use spawner::{DestroySpawnerAction, SpawnAction};

use crate::env::DungeonEnv;
use crate::state::{Direction, DungeonState, EntityId, PotionEffect};

/// Defines how a concrete command mutates dungeon state.
///
/// Validation hooks receive read-only access and must stay side-effect free.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &DungeonState, _env: &DungeonEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the command by mutating the dungeon state directly.
    /// Implementations may assume `pre_validate` has already succeeded.
    fn apply(&self, state: &mut DungeonState, env: &DungeonEnv<'_>) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &DungeonState, _env: &DungeonEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Player-issued commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Command {
    Move(Direction),
    PlaceBomb(EntityId),
    ConsumePotion(EntityId),
    Craft(Recipe),
    DestroySpawner(EntityId),
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Move(_) => "move",
            Command::PlaceBomb(_) => "place_bomb",
            Command::ConsumePotion(_) => "consume_potion",
            Command::Craft(_) => "craft",
            Command::DestroySpawner(_) => "destroy_spawner",
        }
    }
}

/// Command-specific result of a successful execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CommandOutcome {
    Move(MoveOutcome),
    PlaceBomb(PlaceBombOutcome),
    /// The potion active after consumption.
    ConsumePotion(Option<PotionEffect>),
    /// Id of the crafted item.
    Craft(EntityId),
    DestroySpawner,
}
