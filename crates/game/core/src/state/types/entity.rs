//! Placed entities and their closed set of variants.
//!
//! Every interaction matches exhaustively on [`EntityKind`], so adding a new
//! variant forces each rule to decide how it treats it.

use super::{EntityId, ItemKind, Position, PotionEffect};
use crate::state::PotionEvent;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PortalColour {
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
    Purple,
    Grey,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EnemyKind {
    ZombieToast,
    Spider,
    Mercenary,
    Assassin,
    Hydra,
}

/// Enemy-specific state, including the potion broadcast it last observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyState {
    pub kind: EnemyKind,
    /// Pacified mercenaries and assassins fight for the player.
    pub allied: bool,
    pub observed_potion: Option<PotionEffect>,
    /// Number of potion broadcasts received.
    pub updates: u64,
}

impl EnemyState {
    pub fn new(kind: EnemyKind) -> Self {
        Self {
            kind,
            allied: false,
            observed_potion: None,
            updates: 0,
        }
    }

    pub fn allied(mut self) -> Self {
        self.allied = true;
        self
    }

    /// Listener contract for [`crate::PotionBroadcaster`].
    pub fn observe(&mut self, event: &PotionEvent) {
        self.observed_potion = event.active;
        self.updates += 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EntityKind {
    Wall,
    Exit { is_open: bool },
    Boulder,
    FloorSwitch { is_on: bool },
    /// `is_open` is a one-way latch.
    Door { key_id: u32, is_open: bool },
    Portal { colour: PortalColour },
    TimeTravelPortal,
    ZombieToastSpawner,
    Enemy(EnemyState),
    /// An item lying on the floor, collectable by the player.
    Item(ItemKind),
    /// A bomb dropped by the player. Never collectable again.
    PlacedBomb,
    /// Echo of the player from an earlier timeline.
    OlderPlayer,
}

impl EntityKind {
    /// Externally visible type tag; reflects state such as open doors.
    pub fn type_tag(&self) -> &'static str {
        match self {
            EntityKind::Wall => "wall",
            EntityKind::Exit { .. } => "exit",
            EntityKind::Boulder => "boulder",
            EntityKind::FloorSwitch { .. } => "switch",
            EntityKind::Door { is_open: false, .. } => "door",
            EntityKind::Door { is_open: true, .. } => "door_open",
            EntityKind::Portal { .. } => "portal",
            EntityKind::TimeTravelPortal => "time_travelling_portal",
            EntityKind::ZombieToastSpawner => "zombie_toast_spawner",
            EntityKind::Enemy(enemy) => match enemy.kind {
                EnemyKind::ZombieToast => "zombie_toast",
                EnemyKind::Spider => "spider",
                EnemyKind::Mercenary => "mercenary",
                EnemyKind::Assassin => "assassin",
                EnemyKind::Hydra => "hydra",
            },
            EntityKind::Item(item) => (*item).into(),
            EntityKind::PlacedBomb => "bomb",
            EntityKind::OlderPlayer => "older_player",
        }
    }

    pub fn is_closed_door(&self) -> bool {
        matches!(self, EntityKind::Door { is_open: false, .. })
    }

    /// Tiles the player can never enter, regardless of inventory.
    pub fn blocks_player(&self) -> bool {
        match self {
            EntityKind::Wall | EntityKind::ZombieToastSpawner => true,
            EntityKind::Exit { .. }
            | EntityKind::Boulder
            | EntityKind::FloorSwitch { .. }
            | EntityKind::Door { .. }
            | EntityKind::Portal { .. }
            | EntityKind::TimeTravelPortal
            | EntityKind::Enemy(_)
            | EntityKind::Item(_)
            | EntityKind::PlacedBomb
            | EntityKind::OlderPlayer => false,
        }
    }

    /// Occupants that stop a boulder from being pushed onto a tile.
    pub fn blocks_boulder(&self) -> bool {
        match self {
            EntityKind::Wall
            | EntityKind::Boulder
            | EntityKind::Portal { .. }
            | EntityKind::ZombieToastSpawner => true,
            EntityKind::Door { is_open, .. } => !is_open,
            EntityKind::Exit { .. }
            | EntityKind::FloorSwitch { .. }
            | EntityKind::TimeTravelPortal
            | EntityKind::Enemy(_)
            | EntityKind::Item(_)
            | EntityKind::PlacedBomb
            | EntityKind::OlderPlayer => false,
        }
    }

    /// Occupants that make the tile beyond a portal untraversable.
    pub fn blocks_landing(&self) -> bool {
        match self {
            EntityKind::Wall | EntityKind::Boulder | EntityKind::ZombieToastSpawner => true,
            EntityKind::Door { is_open, .. } => !is_open,
            EntityKind::Exit { .. }
            | EntityKind::FloorSwitch { .. }
            | EntityKind::Portal { .. }
            | EntityKind::TimeTravelPortal
            | EntityKind::Enemy(_)
            | EntityKind::Item(_)
            | EntityKind::PlacedBomb
            | EntityKind::OlderPlayer => false,
        }
    }

    /// Occupants a freshly spawned enemy may share a tile with.
    pub fn admits_spawn(&self) -> bool {
        match self {
            EntityKind::FloorSwitch { .. } | EntityKind::Item(_) => true,
            EntityKind::Wall
            | EntityKind::Exit { .. }
            | EntityKind::Boulder
            | EntityKind::Door { .. }
            | EntityKind::Portal { .. }
            | EntityKind::TimeTravelPortal
            | EntityKind::ZombieToastSpawner
            | EntityKind::Enemy(_)
            | EntityKind::PlacedBomb
            | EntityKind::OlderPlayer => false,
        }
    }

    pub fn enemy(&self) -> Option<&EnemyState> {
        match self {
            EntityKind::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    pub fn enemy_mut(&mut self) -> Option<&mut EnemyState> {
        match self {
            EntityKind::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    pub fn is_hostile_enemy(&self) -> bool {
        self.enemy().is_some_and(|enemy| !enemy.allied)
    }
}

/// A placed entity. Position changes go through the registry so the
/// position index stays in sync.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub(crate) position: Position,
    pub kind: EntityKind,
    pub health: Option<u32>,
}

impl Entity {
    pub fn new(id: EntityId, position: Position, kind: EntityKind) -> Self {
        Self {
            id,
            position,
            kind,
            health: None,
        }
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = Some(health);
        self
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn type_tag(&self) -> &'static str {
        self.kind.type_tag()
    }
}
