//! Zombie toast spawners.

use arrayvec::ArrayVec;

use crate::state::{
    Direction, EnemyKind, EnemyState, EntityKind, EntityRegistry, ItemTag, PlayerState, Position,
};

/// Why a spawner cannot be destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DestroyBlocker {
    NotAdjacent,
    NoSword,
}

impl DestroyBlocker {
    pub fn reason(self) -> &'static str {
        match self {
            DestroyBlocker::NotAdjacent => "player is not adjacent to the spawner",
            DestroyBlocker::NoSword => "destroying a spawner requires a sword",
        }
    }
}

/// Neighbouring tiles a new zombie toast may appear on, in spawn order.
pub fn spawn_candidates(
    registry: &EntityRegistry,
    player: &PlayerState,
    spawner: Position,
) -> ArrayVec<Position, 4> {
    Direction::ALL
        .into_iter()
        .map(|direction| spawner.step(direction))
        .filter(|tile| *tile != player.position())
        .filter(|tile| registry.entities_at(*tile).all(|entity| entity.kind.admits_spawn()))
        .collect()
}

/// First tile a new zombie toast would appear on.
pub fn spawn_tile(
    registry: &EntityRegistry,
    player: &PlayerState,
    spawner: Position,
) -> Option<Position> {
    spawn_candidates(registry, player, spawner).first().copied()
}

/// Checks the player may destroy a spawner standing on `spawner`.
pub fn check_destroy(player: &PlayerState, spawner: Position) -> Result<(), DestroyBlocker> {
    if !player.position().is_cardinally_adjacent(spawner) {
        return Err(DestroyBlocker::NotAdjacent);
    }
    if !player.inventory.contains(ItemTag::Sword) {
        return Err(DestroyBlocker::NoSword);
    }
    Ok(())
}

/// Kind given to freshly spawned enemies.
pub fn zombie_toast() -> EntityKind {
    EntityKind::Enemy(EnemyState::new(EnemyKind::ZombieToast))
}
