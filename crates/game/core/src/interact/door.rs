//! Locked doors.

use crate::state::{DungeonState, Entity, EntityId, EntityKind, PlayerState};

/// How the player gets through a door, if at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorPassage {
    /// Already open; nothing changes.
    Open,
    /// Opened by a sun stone, which is kept.
    SunStone,
    /// Opened by the matching key, which is consumed.
    Unlock { key: EntityId },
    Locked,
}

impl DoorPassage {
    pub fn is_passable(self) -> bool {
        !matches!(self, DoorPassage::Locked)
    }

    /// True when passing changes the door or the inventory.
    pub fn opens(self) -> bool {
        matches!(self, DoorPassage::SunStone | DoorPassage::Unlock { .. })
    }
}

/// Decides whether `player` can pass `door`. Non-doors are always open.
pub fn passage(player: &PlayerState, door: &Entity) -> DoorPassage {
    let EntityKind::Door { key_id, is_open } = door.kind else {
        return DoorPassage::Open;
    };

    if player.has_sun_stone() {
        return if is_open {
            DoorPassage::Open
        } else {
            DoorPassage::SunStone
        };
    }
    // A matching key is spent even on a door that is already open.
    match player.inventory.key() {
        Some((key, held)) if held == key_id => DoorPassage::Unlock { key },
        _ if is_open => DoorPassage::Open,
        _ => DoorPassage::Locked,
    }
}

/// Opens the door and consumes the key the passage calls for.
pub(crate) fn commit(state: &mut DungeonState, door: EntityId, passage: DoorPassage) {
    if let DoorPassage::Unlock { key } = passage {
        state.player.inventory.remove(key);
    }
    if !passage.opens() {
        return;
    }
    if let Some(EntityKind::Door { is_open, .. }) = state.registry.kind_mut(door) {
        *is_open = true;
    }
}
