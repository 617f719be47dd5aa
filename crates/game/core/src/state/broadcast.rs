//! Potion effect broadcaster.
//!
//! Enemies register a listener handle (their entity id) on spawn and drop it
//! on removal. Every publish delivers the current active potion, so a
//! listener never holds a stale view after a tick.

use std::collections::BTreeSet;

use super::registry::EntityRegistry;
use super::types::{EntityId, PotionEffect};

/// Snapshot of the player's potion state delivered to listeners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PotionEvent {
    pub active: Option<PotionEffect>,
}

impl PotionEvent {
    pub fn new(active: Option<PotionEffect>) -> Self {
        Self { active }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PotionBroadcaster {
    listeners: BTreeSet<EntityId>,
    published: u64,
}

impl PotionBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listeners(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.listeners.iter().copied()
    }

    pub fn is_subscribed(&self, id: EntityId) -> bool {
        self.listeners.contains(&id)
    }

    /// Number of publishes so far, subscription syncs excluded.
    pub fn published(&self) -> u64 {
        self.published
    }

    /// Registers `id` and synchronises it with `current` immediately.
    ///
    /// Returns false if `id` is not an enemy in `registry`.
    pub fn subscribe(
        &mut self,
        id: EntityId,
        registry: &mut EntityRegistry,
        current: &PotionEvent,
    ) -> bool {
        let Some(enemy) = registry.kind_mut(id).and_then(|kind| kind.enemy_mut()) else {
            return false;
        };
        enemy.observe(current);
        self.listeners.insert(id);
        true
    }

    pub fn unsubscribe(&mut self, id: EntityId) -> bool {
        self.listeners.remove(&id)
    }

    /// Notifies every listener. Returns how many were reached.
    pub fn publish(&mut self, registry: &mut EntityRegistry, event: &PotionEvent) -> usize {
        self.published += 1;
        let mut delivered = 0;
        for id in &self.listeners {
            if let Some(enemy) = registry.kind_mut(*id).and_then(|kind| kind.enemy_mut()) {
                enemy.observe(event);
                delivered += 1;
            }
        }
        tracing::trace!(delivered, active = ?event.active, "potion state broadcast");
        delivered
    }
}
