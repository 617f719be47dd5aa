//! Collectable item kinds and item instances.

use super::{EntityId, PotionKind};

/// Every item that can lie on the floor or sit in the player's inventory.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::EnumDiscriminants,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
#[strum_discriminants(name(ItemTag), derive(Hash, strum::Display))]
#[strum_discriminants(strum(serialize_all = "snake_case"))]
pub enum ItemKind {
    Treasure,
    /// Substitutes for keys at doors and for the trade item in shield crafting.
    SunStone,
    Key {
        key_id: u32,
    },
    Wood,
    Arrow,
    Sword,
    Bow,
    Shield,
    Bomb,
    InvincibilityPotion,
    InvisibilityPotion,
}

impl ItemKind {
    #[inline]
    pub fn tag(&self) -> ItemTag {
        ItemTag::from(self)
    }

    /// Weapons are the inventory subset the battle oracle considers.
    pub fn is_weapon(&self) -> bool {
        matches!(self, ItemKind::Sword | ItemKind::Bow | ItemKind::Shield)
    }

    /// Treasure-goal items: collected treasure and sun stones both count.
    pub fn is_treasure(&self) -> bool {
        matches!(self, ItemKind::Treasure | ItemKind::SunStone)
    }

    pub fn potion(&self) -> Option<PotionKind> {
        match self {
            ItemKind::InvincibilityPotion => Some(PotionKind::Invincibility),
            ItemKind::InvisibilityPotion => Some(PotionKind::Invisibility),
            _ => None,
        }
    }
}

/// An item instance. Keeps the entity id it had on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: EntityId,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(id: EntityId, kind: ItemKind) -> Self {
        Self { id, kind }
    }
}
