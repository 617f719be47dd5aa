use tracing::{debug, trace};

use crate::env::{BattleOracle, BattleOutcome, DungeonEnv};
use crate::interact::{BoulderPush, DoorPassage, PortalTraversal, boulder, door, exit, portal, switch};
use crate::state::{
    Direction, DungeonState, EntityId, EntityKind, Item, ItemKind, Position, PotionTick,
};

use super::{ActionError, ActionTransition};

/// How a move attempt resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveResolution {
    /// The player stayed put.
    Blocked,
    /// The player stepped onto the destination and nothing else changed.
    Plain,
    /// The step opened a door or exit, or pushed a boulder.
    WithSideEffect,
    /// The player came out of `via` and landed one tile beyond it.
    Teleported { via: EntityId },
}

/// A single battle fought during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleReport {
    pub enemy: EntityId,
    pub outcome: BattleOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOutcome {
    pub resolution: MoveResolution,
    /// Player position after the move.
    pub position: Position,
    /// Items picked up on the final tile.
    pub collected: Vec<EntityId>,
    /// Entities destroyed by a bomb cascade.
    pub destroyed: Vec<EntityId>,
    pub battles: Vec<BattleReport>,
}

impl MoveOutcome {
    pub fn is_blocked(&self) -> bool {
        self.resolution == MoveResolution::Blocked
    }
}

/// Everything a permitted move will change, computed before any mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovePlan {
    pub landing: Position,
    pub resolution: MoveResolution,
    pub door: Option<(EntityId, DoorPassage)>,
    pub push: Option<BoulderPush>,
}

/// Plans a player move. Returns `None` if the move is blocked.
pub fn plan_move(state: &DungeonState, direction: Direction) -> Option<MovePlan> {
    let registry = &state.registry;
    let origin = state.player.position();
    let destination = origin.step(direction);

    if destination == origin || registry.any_at(destination, EntityKind::blocks_player) {
        return None;
    }

    let door = match registry.find_at(destination, |kind| matches!(kind, EntityKind::Door { .. })) {
        Some(entity) => {
            let passage = door::passage(&state.player, entity);
            if !passage.is_passable() {
                return None;
            }
            Some((entity.id, passage))
        }
        None => None,
    };

    let push = match registry.find_at(destination, |kind| matches!(kind, EntityKind::Boulder)) {
        Some(entity) => Some(boulder::plan_push(registry, entity, direction)?),
        None => None,
    };

    let mut plan = MovePlan {
        landing: destination,
        resolution: MoveResolution::Plain,
        door,
        push,
    };
    if push.is_some() || door.is_some_and(|(_, passage)| passage.opens()) {
        plan.resolution = MoveResolution::WithSideEffect;
    }

    if let Some(entry) = registry.find_at(destination, |kind| matches!(kind, EntityKind::Portal { .. })) {
        match portal::traverse(registry, entry, direction) {
            PortalTraversal::Unpaired => {}
            PortalTraversal::Blocked { .. } => return None,
            PortalTraversal::Clear { exit, landing } => {
                plan.landing = landing;
                plan.resolution = MoveResolution::Teleported { via: exit };
            }
        }
    }

    Some(plan)
}

/// Moves the player one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub direction: Direction,
}

impl MoveAction {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

impl ActionTransition for MoveAction {
    type Error = ActionError;
    type Result = MoveOutcome;

    fn apply(&self, state: &mut DungeonState, env: &DungeonEnv<'_>) -> Result<MoveOutcome, ActionError> {
        let origin = state.player.position();

        let Some(plan) = plan_move(state, self.direction) else {
            let battles = resolve_encounters(state, env.battle());
            debug!(direction = ?self.direction, %origin, "move blocked");
            return Ok(MoveOutcome {
                resolution: MoveResolution::Blocked,
                position: origin,
                collected: Vec::new(),
                destroyed: Vec::new(),
                battles,
            });
        };

        let mut resolution = plan.resolution;
        if let Some((door_id, passage)) = plan.door {
            door::commit(state, door_id, passage);
        }
        let destroyed = match &plan.push {
            Some(push) => boulder::commit_push(state, push, env.blast())?,
            None => Vec::new(),
        };

        state.player.position = plan.landing;
        let collected = collect_items(state, plan.landing);

        if let Some(exit_id) = exit::exit_at(state, plan.landing) {
            if exit::reach(state, exit_id) && resolution == MoveResolution::Plain {
                resolution = MoveResolution::WithSideEffect;
            }
        }

        let battles = resolve_encounters(state, env.battle());
        advance_clock(state);

        debug!(
            direction = ?self.direction,
            %origin,
            landing = %plan.landing,
            ?resolution,
            collected = collected.len(),
            battles = battles.len(),
            "move resolved"
        );

        Ok(MoveOutcome {
            resolution,
            position: plan.landing,
            collected,
            destroyed,
            battles,
        })
    }

    fn post_validate(&self, state: &DungeonState, _env: &DungeonEnv<'_>) -> Result<(), ActionError> {
        switch::check_switches(state)?;
        Ok(())
    }
}

/// Picks up every collectable item on `position`, in tile order.
fn collect_items(state: &mut DungeonState, position: Position) -> Vec<EntityId> {
    let items: Vec<(EntityId, ItemKind)> = state
        .registry
        .entities_at(position)
        .filter_map(|entity| match entity.kind {
            EntityKind::Item(kind) => Some((entity.id, kind)),
            _ => None,
        })
        .collect();

    let mut collected = Vec::new();
    for (id, kind) in items {
        if !state.player.can_collect(id, &kind) {
            continue;
        }
        if state.remove(id).is_none() {
            continue;
        }
        if kind == ItemKind::Bomb {
            state.player.collected_bombs.insert(id);
        }
        state.player.inventory.push(Item::new(id, kind));
        collected.push(id);
    }
    collected
}

/// Battles every hostile enemy sharing the player's tile.
pub(crate) fn resolve_encounters(state: &mut DungeonState, battle: &dyn BattleOracle) -> Vec<BattleReport> {
    let position = state.player.position();
    state.player.encounters = state
        .registry
        .entities_at(position)
        .filter(|entity| entity.kind.is_hostile_enemy())
        .map(|entity| entity.id)
        .collect();

    let mut reports = Vec::new();
    for enemy_id in std::mem::take(&mut state.player.encounters) {
        let Some(enemy) = state.registry.get(enemy_id).copied() else {
            continue;
        };
        let Some(outcome) = battle.battle(&state.player, &enemy) else {
            continue;
        };

        state.player.health = state.player.health.saturating_sub(outcome.player_damage);
        if outcome.enemy_defeated {
            state.remove(enemy_id);
        }
        trace!(enemy = %enemy_id, ?outcome, health = state.player.health, "battle resolved");
        reports.push(BattleReport {
            enemy: enemy_id,
            outcome,
        });
    }
    reports
}

/// Advances the tick counter and the potion queue, then re-broadcasts.
pub(crate) fn advance_clock(state: &mut DungeonState) {
    if let PotionTick::Expired { expired, promoted } = state.player.potions.tick() {
        trace!(potion = %expired.potion, promoted = ?promoted.map(|effect| effect.potion), "potion expired");
    }
    state.tick = state.tick.next();

    let event = state.potion_event();
    state.broadcaster.publish(&mut state.registry, &event);
}

/// Moves an older-player echo one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOlderPlayerAction {
    pub older: EntityId,
    pub direction: Direction,
}

/// Where an older-player echo ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OlderPlayerOutcome {
    Blocked,
    Moved(Position),
    /// Stepped into a portal and left the dungeon.
    Departed,
}

impl MoveOlderPlayerAction {
    pub fn new(older: EntityId, direction: Direction) -> Self {
        Self { older, direction }
    }
}

impl ActionTransition for MoveOlderPlayerAction {
    type Error = ActionError;
    type Result = OlderPlayerOutcome;

    fn pre_validate(&self, state: &DungeonState, _env: &DungeonEnv<'_>) -> Result<(), ActionError> {
        match state.registry.get(self.older).map(|entity| entity.kind) {
            None => Err(ActionError::NoSuchEntity(self.older)),
            Some(EntityKind::OlderPlayer) => Ok(()),
            Some(_) => Err(ActionError::invalid("entity is not an older player")),
        }
    }

    fn apply(
        &self,
        state: &mut DungeonState,
        _env: &DungeonEnv<'_>,
    ) -> Result<OlderPlayerOutcome, ActionError> {
        let origin = state
            .registry
            .get(self.older)
            .map(|entity| entity.position())
            .ok_or(ActionError::NoSuchEntity(self.older))?;
        let destination = origin.step(self.direction);
        let registry = &state.registry;

        let blocked = registry.any_at(destination, |kind| {
            kind.blocks_player() || kind.is_closed_door() || matches!(kind, EntityKind::Boulder)
        });
        if blocked || destination == origin {
            return Ok(OlderPlayerOutcome::Blocked);
        }

        let departs = registry.any_at(destination, |kind| {
            matches!(kind, EntityKind::Portal { .. } | EntityKind::TimeTravelPortal)
        });
        if departs {
            state.remove(self.older);
            debug!(older = %self.older, %destination, "older player departed");
            return Ok(OlderPlayerOutcome::Departed);
        }

        state.registry.relocate(self.older, destination)?;
        Ok(OlderPlayerOutcome::Moved(destination))
    }
}
