//! Player inventory.
//!
//! An ordered multiset of items. Order only matters for "remove first match"
//! during crafting.

use super::{EntityId, Item, ItemKind, ItemTag};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn count(&self, tag: ItemTag) -> usize {
        self.items.iter().filter(|item| item.kind.tag() == tag).count()
    }

    pub fn contains(&self, tag: ItemTag) -> bool {
        self.items.iter().any(|item| item.kind.tag() == tag)
    }

    pub fn get(&self, id: EntityId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The key currently held. At most one exists at any time.
    pub fn key(&self) -> Option<(EntityId, u32)> {
        self.items.iter().find_map(|item| match item.kind {
            ItemKind::Key { key_id } => Some((item.id, key_id)),
            _ => None,
        })
    }

    pub fn weapons(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.kind.is_weapon())
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }
}
