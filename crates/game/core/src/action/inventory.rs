use tracing::debug;

use crate::env::DungeonEnv;
use crate::interact::switch;
use crate::state::{DungeonState, Entity, EntityId, EntityKind, Item, ItemKind, PotionEffect, PotionKind};

use super::{ActionError, ActionTransition};

/// Looks up an inventory item, mapping absence to `NoSuchEntity`.
fn held_item(state: &DungeonState, id: EntityId) -> Result<Item, ActionError> {
    state
        .player
        .inventory
        .get(id)
        .copied()
        .ok_or(ActionError::NoSuchEntity(id))
}

/// Drops a held bomb on the player's tile as a placed bomb.
///
/// The bomb keeps its entity id and can never be picked up again. Dropping
/// it next to a triggered switch detonates it at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceBombAction {
    pub bomb: EntityId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceBombOutcome {
    pub bomb: EntityId,
    /// Entities removed by an immediate detonation, the bomb included.
    pub destroyed: Vec<EntityId>,
}

impl PlaceBombAction {
    pub fn new(bomb: EntityId) -> Self {
        Self { bomb }
    }
}

impl ActionTransition for PlaceBombAction {
    type Error = ActionError;
    type Result = PlaceBombOutcome;

    fn pre_validate(&self, state: &DungeonState, _env: &DungeonEnv<'_>) -> Result<(), ActionError> {
        match held_item(state, self.bomb)?.kind {
            ItemKind::Bomb => Ok(()),
            _ => Err(ActionError::invalid("item is not a bomb")),
        }
    }

    fn apply(
        &self,
        state: &mut DungeonState,
        env: &DungeonEnv<'_>,
    ) -> Result<PlaceBombOutcome, ActionError> {
        let position = state.player.position();
        state
            .player
            .inventory
            .remove(self.bomb)
            .ok_or(ActionError::NoSuchEntity(self.bomb))?;
        state
            .registry
            .add(Entity::new(self.bomb, position, EntityKind::PlacedBomb))?;

        let destroyed = if switch::next_to_triggered_switch(state, position) {
            switch::detonate(state, self.bomb, env.blast())
        } else {
            Vec::new()
        };

        debug!(bomb = %self.bomb, %position, destroyed = destroyed.len(), "bomb placed");
        Ok(PlaceBombOutcome {
            bomb: self.bomb,
            destroyed,
        })
    }
}

/// Drinks a held potion, queueing its effect behind any active one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumePotionAction {
    pub potion: EntityId,
}

impl ConsumePotionAction {
    pub fn new(potion: EntityId) -> Self {
        Self { potion }
    }
}

impl ActionTransition for ConsumePotionAction {
    type Error = ActionError;
    /// The potion active after consumption.
    type Result = Option<PotionEffect>;

    fn pre_validate(&self, state: &DungeonState, _env: &DungeonEnv<'_>) -> Result<(), ActionError> {
        match held_item(state, self.potion)?.kind.potion() {
            Some(_) => Ok(()),
            None => Err(ActionError::invalid("item is not a potion")),
        }
    }

    fn apply(
        &self,
        state: &mut DungeonState,
        _env: &DungeonEnv<'_>,
    ) -> Result<Option<PotionEffect>, ActionError> {
        let item = held_item(state, self.potion)?;
        let kind = item
            .kind
            .potion()
            .ok_or(ActionError::invalid("item is not a potion"))?;
        let duration = match kind {
            PotionKind::Invincibility => state.config.invincibility_duration,
            PotionKind::Invisibility => state.config.invisibility_duration,
        };

        state.player.inventory.remove(self.potion);
        let activated = state
            .player
            .potions
            .push(PotionEffect::new(self.potion, kind, duration));

        let event = state.potion_event();
        state.broadcaster.publish(&mut state.registry, &event);

        debug!(potion = %self.potion, ?kind, activated, queued = state.player.potions.len(), "potion consumed");
        Ok(event.active)
    }
}
