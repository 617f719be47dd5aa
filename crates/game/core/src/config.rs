/// Dungeon configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DungeonConfig {
    /// Starting (and maximum) health of the player.
    pub player_health: u32,
    /// Ticks an invincibility potion stays active once it reaches the queue head.
    pub invincibility_duration: u32,
    /// Ticks an invisibility potion stays active once it reaches the queue head.
    pub invisibility_duration: u32,
    /// Health given to zombie toasts produced by spawners.
    pub zombie_health: u32,
}

impl DungeonConfig {
    // ===== crafting recipes =====
    pub const BOW_WOOD: usize = 1;
    pub const BOW_ARROWS: usize = 3;
    pub const SHIELD_WOOD: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_PLAYER_HEALTH: u32 = 100;
    pub const DEFAULT_POTION_DURATION: u32 = 10;
    pub const DEFAULT_ZOMBIE_HEALTH: u32 = 10;

    pub fn new() -> Self {
        Self {
            player_health: Self::DEFAULT_PLAYER_HEALTH,
            invincibility_duration: Self::DEFAULT_POTION_DURATION,
            invisibility_duration: Self::DEFAULT_POTION_DURATION,
            zombie_health: Self::DEFAULT_ZOMBIE_HEALTH,
        }
    }

    pub fn with_potion_durations(invincibility: u32, invisibility: u32) -> Self {
        Self {
            invincibility_duration: invincibility,
            invisibility_duration: invisibility,
            ..Self::new()
        }
    }
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self::new()
    }
}
