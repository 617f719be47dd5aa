//! Traits describing the collaborators the engine consumes.
//!
//! Combat math and blast destruction are owned by the caller. The
//! [`DungeonEnv`] aggregate bundles them so the engine can invoke them
//! without hard coupling to concrete implementations.

use crate::state::{DungeonState, Entity, EntityId, EntityKind, PlayerState, Position};

/// Result of a single player-versus-enemy battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleOutcome {
    /// The enemy is removed from the dungeon.
    pub enemy_defeated: bool,
    /// Health subtracted from the player (saturating at zero).
    pub player_damage: u32,
}

/// Resolves combat between the player and one enemy.
///
/// Returns `None` when no battle takes place (e.g. the player is invisible).
pub trait BattleOracle {
    fn battle(&self, player: &PlayerState, enemy: &Entity) -> Option<BattleOutcome>;
}

/// Applies a bomb's blast around `origin`.
///
/// The engine removes the bomb itself after the call.
pub trait BlastOracle {
    fn detonate(&self, origin: Position, view: &mut BlastView<'_>);
}

/// The narrow slice of the dungeon a blast may touch.
///
/// Boulders are indestructible and the player is never in reach; destroyed
/// switches leave the triggered set and destroyed enemies stop listening
/// to potion broadcasts.
pub struct BlastView<'a> {
    state: &'a mut DungeonState,
    destroyed: Vec<EntityId>,
}

impl<'a> BlastView<'a> {
    pub(crate) fn new(state: &'a mut DungeonState) -> Self {
        Self {
            state,
            destroyed: Vec::new(),
        }
    }

    pub fn entities_at(&self, position: Position) -> impl Iterator<Item = &Entity> {
        self.state.registry.entities_at(position)
    }

    pub fn player_position(&self) -> Position {
        self.state.player.position()
    }

    /// Destroys an entity. Returns false for unknown ids and boulders.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        match self.state.registry.get(id).map(|entity| entity.kind) {
            None | Some(EntityKind::Boulder) => false,
            Some(_) => {
                self.state.remove(id);
                self.destroyed.push(id);
                true
            }
        }
    }

    pub(crate) fn into_destroyed(self) -> Vec<EntityId> {
        self.destroyed
    }
}

/// Blast that destroys nothing but the bomb itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBlast;

impl BlastOracle for NoBlast {
    fn detonate(&self, _origin: Position, _view: &mut BlastView<'_>) {}
}

/// Combat that never happens.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBattle;

impl BattleOracle for NoBattle {
    fn battle(&self, _player: &PlayerState, _enemy: &Entity) -> Option<BattleOutcome> {
        None
    }
}

/// Aggregates the collaborators required by the action pipeline.
#[derive(Clone, Copy)]
pub struct DungeonEnv<'a> {
    battle: &'a dyn BattleOracle,
    blast: &'a dyn BlastOracle,
}

impl<'a> DungeonEnv<'a> {
    pub fn new(battle: &'a dyn BattleOracle, blast: &'a dyn BlastOracle) -> Self {
        Self { battle, blast }
    }

    /// Environment with no combat and inert bombs.
    pub fn inert() -> DungeonEnv<'static> {
        DungeonEnv {
            battle: &NoBattle,
            blast: &NoBlast,
        }
    }

    pub fn battle(&self) -> &'a dyn BattleOracle {
        self.battle
    }

    pub fn blast(&self) -> &'a dyn BlastOracle {
        self.blast
    }
}

impl core::fmt::Debug for DungeonEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DungeonEnv").finish_non_exhaustive()
    }
}
