pub mod common;
pub mod entity;
pub mod inventory;
pub mod item;
pub mod potion;

// Re-export common types
pub use common::{Direction, EntityId, Position, Tick};

// Re-export entity variants
pub use entity::{EnemyKind, EnemyState, Entity, EntityKind, PortalColour};

// Re-export inventory and item types
pub use inventory::Inventory;
pub use item::{Item, ItemKind, ItemTag};

// Re-export potion queue
pub use potion::{PotionEffect, PotionKind, PotionQueue, PotionTick};
