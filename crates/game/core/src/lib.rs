//! Deterministic interaction and state resolution for grid dungeons.
//!
//! `dungeon-core` defines the canonical rules for a tile-based dungeon: how a
//! player move is blocked or permitted, how boulders, switches, portals and
//! bombs react in cascade, how inventory, crafting and potions mutate, and how
//! the composite goal tree decides completion. All state mutation flows
//! through [`engine::DungeonEngine`]; combat math and blast destruction are
//! supplied by the caller through the oracles in [`env`].
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod goal;
pub mod interact;
pub mod state;

pub use action::{
    ActionError, ActionTransition, BattleReport, Command, CommandOutcome, ConsumePotionAction,
    CraftAction, DestroySpawnerAction, MoveAction, MoveOlderPlayerAction, MoveOutcome,
    MoveResolution, OlderPlayerOutcome, PlaceBombAction, PlaceBombOutcome, Recipe, SpawnAction,
};
pub use config::DungeonConfig;
pub use engine::{DungeonEngine, ExecuteError, TransitionPhase, TransitionPhaseError};
pub use env::{BattleOracle, BattleOutcome, BlastOracle, BlastView, DungeonEnv, NoBattle, NoBlast};
pub use error::{ErrorSeverity, GameError};
pub use goal::{Goal, GoalContext, GoalKind};
pub use state::{
    Direction, DungeonBuilder, DungeonState, EnemyKind, EnemyState, Entity, EntityId, EntityKind,
    EntityRegistry, Inventory, Item, ItemKind, ItemTag, PlayerState, PortalColour,
    PotionBroadcaster, PotionEffect, PotionEvent, PotionKind, PotionQueue, PotionTick, Position,
    StateError, SwitchBoard, Tick,
};
