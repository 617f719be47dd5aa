//! Dungeon configuration loader.

use std::path::Path;

use dungeon_core::DungeonConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for dungeon configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`DungeonConfig::default`].
    pub fn load(path: &Path) -> LoadResult<DungeonConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<DungeonConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}
