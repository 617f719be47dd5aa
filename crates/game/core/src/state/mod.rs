//! Authoritative dungeon state representation.
//!
//! This module owns the entity registry, the player, the triggered switch
//! set, the potion broadcaster and the goal root. Callers read it freely but
//! mutate it exclusively through [`crate::DungeonEngine`].
mod broadcast;
mod error;
mod player;
mod registry;
mod switches;
pub mod types;

pub use broadcast::{PotionBroadcaster, PotionEvent};
pub use error::StateError;
pub use player::PlayerState;
pub use registry::EntityRegistry;
pub use switches::SwitchBoard;
pub use types::{
    Direction, EnemyKind, EnemyState, Entity, EntityId, EntityKind, Inventory, Item, ItemKind,
    ItemTag, PortalColour, Position, PotionEffect, PotionKind, PotionQueue, PotionTick, Tick,
};

use std::collections::BTreeSet;

use tracing::trace;

use crate::config::DungeonConfig;
use crate::goal::{Goal, GoalContext, GoalKind};

/// Canonical snapshot of one dungeon instance.
///
/// With the `serde` feature this is also the persistence snapshot: it holds
/// everything needed to reconstruct the simulation exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DungeonState {
    /// Sequential entity id allocator (monotonically increasing).
    ///
    /// Never reused. Id 0 is reserved for the player.
    next_entity_id: u32,

    /// Number of resolved player moves.
    pub tick: Tick,
    pub config: DungeonConfig,
    pub registry: EntityRegistry,
    pub player: PlayerState,
    pub switches: SwitchBoard,
    pub broadcaster: PotionBroadcaster,
    pub goal: Goal,
    /// Latched once the player stands on an open exit.
    pub exit_reached: bool,
    /// Goal leaves that have been finished at least once.
    #[cfg_attr(feature = "serde", serde(default))]
    finished_goals: BTreeSet<GoalKind>,
}

impl DungeonState {
    /// Creates an empty dungeon with the player at `start`.
    pub fn new(config: DungeonConfig, start: Position, goal: Goal) -> Self {
        let player = PlayerState::new(start, config.player_health);
        Self {
            next_entity_id: 1,
            tick: Tick::ZERO,
            config,
            registry: EntityRegistry::new(),
            player,
            switches: SwitchBoard::new(),
            broadcaster: PotionBroadcaster::new(),
            goal,
            exit_reached: false,
            finished_goals: BTreeSet::new(),
        }
    }

    /// Allocates a new unique EntityId.
    pub fn allocate_entity_id(&mut self) -> Result<EntityId, StateError> {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id =
            self.next_entity_id
                .checked_add(1)
                .ok_or(StateError::EntityIdOverflow {
                    current: self.next_entity_id,
                })?;
        Ok(id)
    }

    /// Places a new entity, subscribing enemies to potion broadcasts.
    pub fn place(
        &mut self,
        position: Position,
        kind: EntityKind,
        health: Option<u32>,
    ) -> Result<EntityId, StateError> {
        let id = self.allocate_entity_id()?;
        let mut entity = Entity::new(id, position, kind);
        entity.health = health;
        self.registry.add(entity)?;

        if kind.enemy().is_some() {
            let current = self.potion_event();
            self.broadcaster
                .subscribe(id, &mut self.registry, &current);
        }
        Ok(id)
    }

    /// Removes an entity along with its listener handle and switch entry.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.registry.remove(id)?;
        match entity.kind {
            EntityKind::Enemy(_) => {
                self.broadcaster.unsubscribe(id);
            }
            EntityKind::FloorSwitch { .. } => {
                self.switches.set(id, false);
            }
            _ => {}
        }
        Some(entity)
    }

    pub fn potion_event(&self) -> PotionEvent {
        PotionEvent::new(self.player.active_potion().copied())
    }

    /// Collects the facts the goal tree is evaluated against.
    pub fn goal_context(&self) -> GoalContext {
        let registry = &self.registry;
        GoalContext {
            latched: self.finished_goals.clone(),
            exit_reached: self.exit_reached,
            treasure_remaining: registry.count(|kind| {
                matches!(kind, EntityKind::Item(item) if item.is_treasure())
            }),
            switches_total: registry.count(|kind| matches!(kind, EntityKind::FloorSwitch { .. })),
            switches_triggered: self.switches.len(),
            enemies_remaining: registry.count(EntityKind::is_hostile_enemy),
            spawners_remaining: registry
                .count(|kind| matches!(kind, EntityKind::ZombieToastSpawner)),
        }
    }

    pub fn finished_goals(&self) -> &BTreeSet<GoalKind> {
        &self.finished_goals
    }

    /// Records every goal leaf that currently holds so it never reverts.
    pub(crate) fn latch_goals(&mut self) {
        let ctx = self.goal_context();
        for kind in self.goal.leaves() {
            if kind.is_finished(&ctx) && self.finished_goals.insert(kind) {
                trace!(goal = %kind, "goal leaf latched");
            }
        }
    }

    /// Derived completion of the whole dungeon.
    pub fn is_complete(&self) -> bool {
        self.goal.is_finished(&self.goal_context())
    }

    /// Unfinished goals as a descriptor, empty when complete.
    pub fn remaining_goals(&self) -> String {
        self.goal.remaining(&self.goal_context())
    }
}

/// Builds a dungeon from entity placements, assigning ids in insertion order.
///
/// Switch flags are derived from boulder placement on build, so the
/// switch invariant holds from the first tick.
#[derive(Clone, Debug)]
pub struct DungeonBuilder {
    config: DungeonConfig,
    start: Position,
    goal: Goal,
    placements: Vec<(Position, EntityKind, Option<u32>)>,
    inventory: Vec<ItemKind>,
}

impl DungeonBuilder {
    pub fn new(start: Position) -> Self {
        Self {
            config: DungeonConfig::default(),
            start,
            goal: Goal::default(),
            placements: Vec::new(),
            inventory: Vec::new(),
        }
    }

    pub fn config(mut self, config: DungeonConfig) -> Self {
        self.config = config;
        self
    }

    pub fn goal(mut self, goal: Goal) -> Self {
        self.goal = goal;
        self
    }

    pub fn entity(mut self, position: Position, kind: EntityKind) -> Self {
        self.placements.push((position, kind, None));
        self
    }

    pub fn entity_with_health(mut self, position: Position, kind: EntityKind, health: u32) -> Self {
        self.placements.push((position, kind, Some(health)));
        self
    }

    /// Starts the player with an item already in the inventory.
    pub fn holding(mut self, kind: ItemKind) -> Self {
        self.inventory.push(kind);
        self
    }

    pub fn build(self) -> Result<DungeonState, StateError> {
        let mut state = DungeonState::new(self.config, self.start, self.goal);

        for (position, kind, health) in self.placements {
            state.place(position, kind, health)?;
        }

        for kind in self.inventory {
            if let (ItemKind::Key { key_id }, Some(_)) = (kind, state.player.inventory.key()) {
                return Err(StateError::ExtraKey { key_id });
            }
            let id = state.allocate_entity_id()?;
            if kind == ItemKind::Bomb {
                state.player.collected_bombs.insert(id);
            }
            state.player.inventory.push(Item::new(id, kind));
        }

        let switches: Vec<(EntityId, Position)> = state
            .registry
            .filter(|kind| matches!(kind, EntityKind::FloorSwitch { .. }))
            .map(|entity| (entity.id, entity.position()))
            .collect();
        for (id, position) in switches {
            let weighted = state
                .registry
                .any_at(position, |kind| matches!(kind, EntityKind::Boulder));
            if let Some(EntityKind::FloorSwitch { is_on }) = state.registry.kind_mut(id) {
                *is_on = weighted;
            }
            state.switches.set(id, weighted);
        }

        state.latch_goals();
        Ok(state)
    }
}
