use std::collections::BTreeSet;

use super::types::{EntityId, Inventory, ItemKind, ItemTag, Position, PotionEffect, PotionQueue};

/// The controllable player. Lives outside the registry under
/// [`EntityId::PLAYER`].
///
/// # Invariants
///
/// - The inventory holds at most one key.
/// - `encounters` is empty between commands.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub id: EntityId,
    pub(crate) position: Position,
    pub health: u32,
    pub inventory: Inventory,
    pub potions: PotionQueue,
    /// Bombs picked up at least once. A dropped bomb is never collectable again.
    pub collected_bombs: BTreeSet<EntityId>,
    /// Enemies met during the current move, consumed by combat.
    pub encounters: Vec<EntityId>,
}

impl PlayerState {
    pub fn new(position: Position, health: u32) -> Self {
        Self {
            id: EntityId::PLAYER,
            position,
            health,
            inventory: Inventory::new(),
            potions: PotionQueue::new(),
            collected_bombs: BTreeSet::new(),
            encounters: Vec::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn has_sun_stone(&self) -> bool {
        self.inventory.contains(ItemTag::SunStone)
    }

    pub fn active_potion(&self) -> Option<&PotionEffect> {
        self.potions.active()
    }

    /// Whether an item of this kind may be picked up right now.
    pub fn can_collect(&self, id: EntityId, kind: &ItemKind) -> bool {
        match kind {
            ItemKind::Key { .. } => self.inventory.key().is_none(),
            ItemKind::Bomb => !self.collected_bombs.contains(&id),
            ItemKind::Treasure
            | ItemKind::SunStone
            | ItemKind::Wood
            | ItemKind::Arrow
            | ItemKind::Sword
            | ItemKind::Bow
            | ItemKind::Shield
            | ItemKind::InvincibilityPotion
            | ItemKind::InvisibilityPotion => true,
        }
    }
}
