//! Potion effect queue.
//!
//! Consumed potions wait in FIFO order; only the head is active. Durations
//! count down in ticks of the player's move clock.

use std::collections::VecDeque;

use super::EntityId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum PotionKind {
    /// Enemies flee; battles are won outright.
    Invincibility,
    /// Enemies ignore the player; no battle takes place.
    Invisibility,
}

/// A consumed potion together with its remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PotionEffect {
    /// Entity id the potion had as an item.
    pub potion: EntityId,
    pub kind: PotionKind,
    pub remaining: u32,
}

impl PotionEffect {
    pub fn new(potion: EntityId, kind: PotionKind, duration: u32) -> Self {
        Self {
            potion,
            kind,
            remaining: duration,
        }
    }
}

/// What happened to the queue during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PotionTick {
    /// No potion was active.
    Idle,
    /// The active potion lost one unit of duration and is still active.
    Decayed,
    /// The active potion ran out; `promoted` is the new head, if any.
    Expired {
        expired: PotionEffect,
        promoted: Option<PotionEffect>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PotionQueue {
    queue: VecDeque<PotionEffect>,
}

impl PotionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a consumed potion. Returns true when it became active at once.
    pub fn push(&mut self, effect: PotionEffect) -> bool {
        self.queue.push_back(effect);
        self.queue.len() == 1
    }

    pub fn active(&self) -> Option<&PotionEffect> {
        self.queue.front()
    }

    pub fn is_active(&self, kind: PotionKind) -> bool {
        self.active().is_some_and(|effect| effect.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PotionEffect> {
        self.queue.iter()
    }

    /// Advances the active potion by one tick.
    pub fn tick(&mut self) -> PotionTick {
        let Some(head) = self.queue.front_mut() else {
            return PotionTick::Idle;
        };

        head.remaining = head.remaining.saturating_sub(1);
        if head.remaining > 0 {
            return PotionTick::Decayed;
        }

        match self.queue.pop_front() {
            Some(expired) => PotionTick::Expired {
                expired,
                promoted: self.queue.front().copied(),
            },
            None => PotionTick::Idle,
        }
    }
}
