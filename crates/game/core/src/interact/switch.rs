//! Floor switches and the bomb cascade they trigger.

use tracing::trace;

use crate::env::{BlastOracle, BlastView};
use crate::state::{DungeonState, EntityId, EntityKind, EntityRegistry, Position, StateError};

/// Placed bombs on the four tiles around `position`, in neighbour order.
pub fn adjacent_placed_bombs(registry: &EntityRegistry, position: Position) -> Vec<EntityId> {
    position
        .cardinal_neighbours()
        .into_iter()
        .flat_map(|neighbour| registry.entities_at(neighbour))
        .filter(|entity| matches!(entity.kind, EntityKind::PlacedBomb))
        .map(|entity| entity.id)
        .collect()
}

/// True if any switch next to `position` is currently triggered.
pub fn next_to_triggered_switch(state: &DungeonState, position: Position) -> bool {
    position.cardinal_neighbours().into_iter().any(|neighbour| {
        state.registry.entities_at(neighbour).any(|entity| {
            matches!(entity.kind, EntityKind::FloorSwitch { .. })
                && state.switches.is_triggered(entity.id)
        })
    })
}

/// Checks `is_on`, board membership and boulder presence agree for every switch.
pub fn check_switches(state: &DungeonState) -> Result<(), StateError> {
    let registry = &state.registry;
    for switch in registry.filter(|kind| matches!(kind, EntityKind::FloorSwitch { .. })) {
        let EntityKind::FloorSwitch { is_on } = switch.kind else {
            continue;
        };
        let weighted = registry.any_at(switch.position(), |kind| matches!(kind, EntityKind::Boulder));
        if is_on != weighted || state.switches.is_triggered(switch.id) != weighted {
            return Err(StateError::SwitchDesync { id: switch.id });
        }
    }
    for id in state.switches.triggered() {
        let is_switch = registry
            .get(id)
            .is_some_and(|entity| matches!(entity.kind, EntityKind::FloorSwitch { .. }));
        if !is_switch {
            return Err(StateError::SwitchDesync { id });
        }
    }
    Ok(())
}

/// Turns a switch on and detonates the placed bombs around it.
///
/// Returns every entity removed by the cascade, bombs included.
pub(crate) fn press(
    state: &mut DungeonState,
    switch: EntityId,
    blast: &dyn BlastOracle,
) -> Vec<EntityId> {
    let Some(position) = set(state, switch, true) else {
        return Vec::new();
    };
    trace!(%switch, %position, "switch pressed");

    let mut removed = Vec::new();
    for bomb in adjacent_placed_bombs(&state.registry, position) {
        removed.extend(detonate(state, bomb, blast));
    }
    removed
}

/// Turns a switch off. Releasing a switch has no cascade.
pub(crate) fn release(state: &mut DungeonState, switch: EntityId) {
    if let Some(position) = set(state, switch, false) {
        trace!(%switch, %position, "switch released");
    }
}

/// Detonates a placed bomb through the blast oracle and removes it.
///
/// Bombs already consumed by an earlier blast in the same cascade are skipped.
pub(crate) fn detonate(
    state: &mut DungeonState,
    bomb: EntityId,
    blast: &dyn BlastOracle,
) -> Vec<EntityId> {
    let Some(origin) = state.registry.get(bomb).map(|entity| entity.position()) else {
        return Vec::new();
    };

    let mut view = BlastView::new(state);
    blast.detonate(origin, &mut view);
    let mut removed = view.into_destroyed();

    if state.remove(bomb).is_some() {
        removed.push(bomb);
    }
    trace!(%bomb, %origin, destroyed = removed.len(), "bomb detonated");
    removed
}

/// Writes the flag and the triggered set together. Returns the switch tile.
fn set(state: &mut DungeonState, switch: EntityId, on: bool) -> Option<Position> {
    let position = state.registry.get(switch)?.position();
    match state.registry.kind_mut(switch) {
        Some(EntityKind::FloorSwitch { is_on }) => *is_on = on,
        _ => return None,
    }
    state.switches.set(switch, on);
    Some(position)
}
