//! Utility functions for xtask commands

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use dungeon_content::ConfigLoader;
use dungeon_core::{DungeonConfig, DungeonState};

/// Environment variable naming a default config TOML.
pub const CONFIG_ENV: &str = "DUNGEON_CONFIG";

/// Resolves the dungeon config: explicit path, then `$DUNGEON_CONFIG`, then defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<DungeonConfig> {
    if let Some(path) = explicit {
        return ConfigLoader::load(path);
    }

    match std::env::var(CONFIG_ENV) {
        Ok(path) if !path.is_empty() => ConfigLoader::load(Path::new(&path))
            .with_context(|| format!("Failed to load config from ${CONFIG_ENV}")),
        _ => Ok(DungeonConfig::default()),
    }
}

pub fn save_snapshot(path: &Path, state: &DungeonState) -> Result<()> {
    let text = ron::ser::to_string_pretty(state, ron::ser::PrettyConfig::default())
        .context("Failed to serialize dungeon snapshot")?;
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write snapshot: {}", path.display()))
}

pub fn load_snapshot(path: &Path) -> Result<DungeonState> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    ron::from_str(&text).with_context(|| format!("Failed to parse snapshot: {}", path.display()))
}

pub fn print_summary(state: &DungeonState) {
    println!("{}", style("=== Dungeon Summary ===").bold().green());
    println!();

    println!("{}", style("Player:").bold().yellow());
    println!("  Tick: {}", state.tick);
    println!("  Position: {}", state.player.position());
    println!(
        "  Health: {}/{}",
        state.player.health, state.config.player_health
    );
    let items: Vec<&'static str> = state
        .player
        .inventory
        .items()
        .iter()
        .map(|item| item.kind.into())
        .collect();
    println!("  Inventory: {}", items.join(", "));
    let mut potions = state.player.potions.iter();
    if let Some(effect) = potions.next() {
        println!(
            "  Active potion: {} ({} ticks left)",
            effect.kind, effect.remaining
        );
    }
    for effect in potions {
        println!("  Queued potion: {} ({} ticks)", effect.kind, effect.remaining);
    }
    println!();

    println!("{}", style("Goal:").bold().yellow());
    if state.is_complete() {
        println!("  {}", style("complete").green());
    } else {
        println!("  Remaining: {}", state.remaining_goals());
    }
    println!("  Exit reached: {}", state.exit_reached);
    println!();

    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for entity in state.registry.all_entities() {
        *counts.entry(entity.type_tag()).or_default() += 1;
    }
    println!("{}", style("Entities:").bold().yellow());
    println!("  Total: {}", state.registry.len());
    for (tag, count) in counts {
        println!("  {}: {}", tag, count);
    }
}
