//! Reference combat and blast collaborators.
//!
//! The engine treats both as opaque oracles. These implementations are
//! deterministic and small enough for scripted play and tests.

use dungeon_core::{
    BattleOracle, BattleOutcome, BlastOracle, BlastView, Entity, EntityId, ItemKind, ItemTag,
    PlayerState, Position, PotionKind,
};

/// Round-based combat from flat attack values.
///
/// The player strikes first every round. Each sword adds [`Self::SWORD_BONUS`],
/// a bow doubles the total, and a shield halves incoming damage (rounding up).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatBattle {
    pub player_attack: u32,
    pub enemy_attack: u32,
    /// Health assumed for enemies placed without one.
    pub enemy_health: u32,
}

impl StatBattle {
    pub const SWORD_BONUS: u32 = 2;

    pub fn new(player_attack: u32, enemy_attack: u32, enemy_health: u32) -> Self {
        Self {
            player_attack,
            enemy_attack,
            enemy_health,
        }
    }

    fn attack(&self, player: &PlayerState) -> u32 {
        let mut attack = self.player_attack;
        let mut bow = false;
        for weapon in player.inventory.weapons() {
            match weapon.kind {
                ItemKind::Sword => attack += Self::SWORD_BONUS,
                ItemKind::Bow => bow = true,
                _ => {}
            }
        }
        if bow {
            attack *= 2;
        }
        attack.max(1)
    }

    fn incoming(&self, player: &PlayerState) -> u32 {
        if player.inventory.contains(ItemTag::Shield) {
            self.enemy_attack.div_ceil(2)
        } else {
            self.enemy_attack
        }
    }
}

impl Default for StatBattle {
    fn default() -> Self {
        Self::new(3, 2, 10)
    }
}

impl BattleOracle for StatBattle {
    fn battle(&self, player: &PlayerState, enemy: &Entity) -> Option<BattleOutcome> {
        match player.active_potion().map(|effect| effect.kind) {
            Some(PotionKind::Invisibility) => return None,
            Some(PotionKind::Invincibility) => {
                return Some(BattleOutcome {
                    enemy_defeated: true,
                    player_damage: 0,
                });
            }
            None => {}
        }

        let health = enemy.health.unwrap_or(self.enemy_health);
        let rounds = health.div_ceil(self.attack(player));
        // The final round ends before the enemy strikes back.
        let damage = rounds.saturating_sub(1).saturating_mul(self.incoming(player));

        Some(BattleOutcome {
            enemy_defeated: damage < player.health,
            player_damage: damage.min(player.health),
        })
    }
}

/// Destroys everything within a square of `radius` tiles around the bomb.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SquareBlast {
    pub radius: i32,
}

impl SquareBlast {
    pub fn new(radius: i32) -> Self {
        Self { radius }
    }
}

impl Default for SquareBlast {
    fn default() -> Self {
        Self::new(1)
    }
}

impl BlastOracle for SquareBlast {
    fn detonate(&self, origin: Position, view: &mut BlastView<'_>) {
        for dy in -self.radius..=self.radius {
            for dx in -self.radius..=self.radius {
                let tile = Position::new(origin.x + dx, origin.y + dy);
                let ids: Vec<EntityId> = view.entities_at(tile).map(|entity| entity.id).collect();
                for id in ids {
                    view.destroy(id);
                }
            }
        }
    }
}
