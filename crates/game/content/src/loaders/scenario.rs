//! Scenario loader.
//!
//! A scenario describes where the player starts, what it carries, the goal
//! tree, and where every other entity sits. Entity ids are allocated when the
//! scenario is built, in placement order, followed by the starting inventory.

use std::path::Path;

use dungeon_core::{
    DungeonBuilder, DungeonConfig, DungeonState, EnemyKind, EnemyState, EntityKind, Goal,
    ItemKind, PortalColour, Position, StateError,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// What to place on a tile.
///
/// Switches, doors and exits always start in their resting state; switch
/// flags are derived from boulder placement when the dungeon is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementKind {
    Wall,
    Exit,
    Boulder,
    Switch,
    Door {
        key_id: u32,
    },
    Portal {
        colour: PortalColour,
    },
    TimeTravelPortal,
    Spawner,
    Enemy {
        kind: EnemyKind,
        #[serde(default)]
        allied: bool,
        #[serde(default)]
        health: Option<u32>,
    },
    Item(ItemKind),
    OlderPlayer,
}

impl PlacementKind {
    fn into_entity(self) -> (EntityKind, Option<u32>) {
        match self {
            PlacementKind::Wall => (EntityKind::Wall, None),
            PlacementKind::Exit => (EntityKind::Exit { is_open: false }, None),
            PlacementKind::Boulder => (EntityKind::Boulder, None),
            PlacementKind::Switch => (EntityKind::FloorSwitch { is_on: false }, None),
            PlacementKind::Door { key_id } => (
                EntityKind::Door {
                    key_id,
                    is_open: false,
                },
                None,
            ),
            PlacementKind::Portal { colour } => (EntityKind::Portal { colour }, None),
            PlacementKind::TimeTravelPortal => (EntityKind::TimeTravelPortal, None),
            PlacementKind::Spawner => (EntityKind::ZombieToastSpawner, None),
            PlacementKind::Enemy {
                kind,
                allied,
                health,
            } => {
                let enemy = EnemyState::new(kind);
                let enemy = if allied { enemy.allied() } else { enemy };
                (EntityKind::Enemy(enemy), health)
            }
            PlacementKind::Item(item) => (EntityKind::Item(item), None),
            PlacementKind::OlderPlayer => (EntityKind::OlderPlayer, None),
        }
    }
}

/// Entity placement for scenario setup. Ids are allocated at build time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPlacement {
    pub position: Position,
    pub kind: PlacementKind,
}

/// Everything needed to build a fresh dungeon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub start: Position,
    #[serde(default)]
    pub goal: Goal,
    #[serde(default)]
    pub inventory: Vec<ItemKind>,
    #[serde(default)]
    pub placements: Vec<EntityPlacement>,
}

impl Scenario {
    /// Builds the dungeon under `config`.
    pub fn build(self, config: DungeonConfig) -> Result<DungeonState, StateError> {
        let mut builder = DungeonBuilder::new(self.start)
            .config(config)
            .goal(self.goal);

        for placement in self.placements {
            builder = match placement.kind.into_entity() {
                (kind, Some(health)) => builder.entity_with_health(placement.position, kind, health),
                (kind, None) => builder.entity(placement.position, kind),
            };
        }

        for item in self.inventory {
            builder = builder.holding(item);
        }

        builder.build()
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario description from a RON file without building it.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))
    }

    /// Load a scenario and build the dungeon it describes.
    pub fn load_state(path: &Path, config: DungeonConfig) -> LoadResult<DungeonState> {
        let scenario = Self::load(path)?;
        let placements = scenario.placements.len();

        let state = scenario.build(config).map_err(|e| {
            anyhow::anyhow!("Failed to build scenario {}: {}", path.display(), e)
        })?;

        debug!(
            path = %path.display(),
            placements,
            goal = %state.remaining_goals(),
            "scenario loaded"
        );
        Ok(state)
    }
}
