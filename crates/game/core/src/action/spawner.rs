use tracing::debug;

use crate::env::DungeonEnv;
use crate::interact::spawner;
use crate::state::{DungeonState, Entity, EntityId, EntityKind};

use super::{ActionError, ActionTransition};

fn spawner_entity(state: &DungeonState, id: EntityId) -> Result<Entity, ActionError> {
    let entity = state
        .registry
        .get(id)
        .copied()
        .ok_or(ActionError::NoSuchEntity(id))?;
    match entity.kind {
        EntityKind::ZombieToastSpawner => Ok(entity),
        _ => Err(ActionError::invalid("entity is not a zombie toast spawner")),
    }
}

/// Destroys an adjacent spawner with a sword.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DestroySpawnerAction {
    pub spawner: EntityId,
}

impl DestroySpawnerAction {
    pub fn new(spawner: EntityId) -> Self {
        Self { spawner }
    }
}

impl ActionTransition for DestroySpawnerAction {
    type Error = ActionError;
    type Result = ();

    fn pre_validate(&self, state: &DungeonState, _env: &DungeonEnv<'_>) -> Result<(), ActionError> {
        let entity = spawner_entity(state, self.spawner)?;
        spawner::check_destroy(&state.player, entity.position())
            .map_err(|blocker| ActionError::invalid(blocker.reason()))
    }

    fn apply(&self, state: &mut DungeonState, _env: &DungeonEnv<'_>) -> Result<(), ActionError> {
        state
            .remove(self.spawner)
            .ok_or(ActionError::NoSuchEntity(self.spawner))?;
        debug!(spawner = %self.spawner, "spawner destroyed");
        Ok(())
    }
}

/// Lets a spawner produce one zombie toast. Called on the caller's cadence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnAction {
    pub spawner: EntityId,
}

impl SpawnAction {
    pub fn new(spawner: EntityId) -> Self {
        Self { spawner }
    }
}

impl ActionTransition for SpawnAction {
    type Error = ActionError;
    /// The new enemy, or `None` when every neighbouring tile is taken.
    type Result = Option<EntityId>;

    fn pre_validate(&self, state: &DungeonState, _env: &DungeonEnv<'_>) -> Result<(), ActionError> {
        spawner_entity(state, self.spawner).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut DungeonState,
        _env: &DungeonEnv<'_>,
    ) -> Result<Option<EntityId>, ActionError> {
        let origin = spawner_entity(state, self.spawner)?.position();
        let Some(tile) = spawner::spawn_tile(&state.registry, &state.player, origin) else {
            debug!(spawner = %self.spawner, "no free tile to spawn on");
            return Ok(None);
        };

        let health = state.config.zombie_health;
        let zombie = state.place(tile, spawner::zombie_toast(), Some(health))?;
        debug!(spawner = %self.spawner, %zombie, %tile, "zombie toast spawned");
        Ok(Some(zombie))
    }
}
