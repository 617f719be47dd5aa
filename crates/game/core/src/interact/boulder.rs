//! Boulder pushing.
//!
//! A push is planned against a read-only registry and only committed once
//! the whole move is known to succeed.

use crate::env::BlastOracle;
use crate::state::{DungeonState, Direction, Entity, EntityId, EntityKind, EntityRegistry, Position, StateError};

use super::switch;

/// A push that is known to succeed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoulderPush {
    pub boulder: EntityId,
    pub from: Position,
    pub to: Position,
    /// Switch under the boulder before the push.
    pub released: Option<EntityId>,
    /// Switch the boulder lands on.
    pub pressed: Option<EntityId>,
}

/// Plans pushing `boulder` one tile in `direction`.
///
/// Returns `None` when the tile beyond holds a boulder, wall, portal,
/// spawner or closed door.
pub fn plan_push(
    registry: &EntityRegistry,
    boulder: &Entity,
    direction: Direction,
) -> Option<BoulderPush> {
    let from = boulder.position();
    let to = from.step(direction);

    if registry.any_at(to, EntityKind::blocks_boulder) {
        return None;
    }

    let switch_at = |position: Position| {
        registry
            .find_at(position, |kind| matches!(kind, EntityKind::FloorSwitch { .. }))
            .map(|entity| entity.id)
    };

    Some(BoulderPush {
        boulder: boulder.id,
        from,
        to,
        released: switch_at(from),
        pressed: switch_at(to),
    })
}

/// Moves the boulder and updates the switches it leaves and lands on.
///
/// Returns the entities removed by any bomb cascade.
pub(crate) fn commit_push(
    state: &mut DungeonState,
    push: &BoulderPush,
    blast: &dyn BlastOracle,
) -> Result<Vec<EntityId>, StateError> {
    state.registry.relocate(push.boulder, push.to)?;

    if let Some(released) = push.released {
        switch::release(state, released);
    }

    Ok(match push.pressed {
        Some(pressed) => switch::press(state, pressed, blast),
        None => Vec::new(),
    })
}
