//! Data-driven dungeon content and reference collaborators.
//!
//! This crate provides loaders for RON/TOML data files:
//! - Dungeon configuration (data-driven via TOML)
//! - Scenarios: player start, goal tree, starting inventory and entity placements (RON)
//!
//! It also ships the reference [`BattleOracle`](dungeon_core::BattleOracle) and
//! [`BlastOracle`](dungeon_core::BlastOracle) used by the developer tooling.

pub mod collaborators;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use collaborators::{SquareBlast, StatBattle};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, EntityPlacement, PlacementKind, Scenario, ScenarioLoader};
