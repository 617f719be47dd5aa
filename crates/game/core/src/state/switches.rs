//! Triggered floor switch set.
//!
//! Mirrors every switch's `is_on` flag. Only the switch interaction writes
//! to it, always together with the flag on the entity.

use std::collections::BTreeSet;

use super::types::EntityId;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchBoard {
    triggered: BTreeSet<EntityId>,
}

impl SwitchBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_triggered(&self, id: EntityId) -> bool {
        self.triggered.contains(&id)
    }

    pub fn triggered(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.triggered.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.triggered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggered.is_empty()
    }

    pub(crate) fn set(&mut self, id: EntityId, on: bool) -> bool {
        if on {
            self.triggered.insert(id)
        } else {
            self.triggered.remove(&id)
        }
    }
}
