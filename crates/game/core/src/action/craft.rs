use tracing::debug;

use crate::config::DungeonConfig;
use crate::env::DungeonEnv;
use crate::state::{DungeonState, EntityId, Inventory, Item, ItemKind, ItemTag};

use super::{ActionError, ActionTransition};

/// Buildable items.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Recipe {
    Bow,
    Shield,
}

impl Recipe {
    pub fn product(self) -> ItemKind {
        match self {
            Recipe::Bow => ItemKind::Bow,
            Recipe::Shield => ItemKind::Shield,
        }
    }

    /// Picks the inventory items this recipe consumes, first matches first.
    ///
    /// Returns `None` if any ingredient is missing. A held sun stone waives
    /// the shield's trade item and is never consumed.
    pub fn ingredients(self, inventory: &Inventory) -> Option<Vec<EntityId>> {
        let mut picked = Vec::new();
        match self {
            Recipe::Bow => {
                take(inventory, ItemTag::Wood, DungeonConfig::BOW_WOOD, &mut picked)?;
                take(inventory, ItemTag::Arrow, DungeonConfig::BOW_ARROWS, &mut picked)?;
            }
            Recipe::Shield => {
                take(inventory, ItemTag::Wood, DungeonConfig::SHIELD_WOOD, &mut picked)?;
                if !inventory.contains(ItemTag::SunStone) {
                    take(inventory, ItemTag::Treasure, 1, &mut picked)
                        .or_else(|| take(inventory, ItemTag::Key, 1, &mut picked))?;
                }
            }
        }
        Some(picked)
    }
}

fn take(inventory: &Inventory, tag: ItemTag, count: usize, picked: &mut Vec<EntityId>) -> Option<()> {
    let ids: Vec<EntityId> = inventory
        .items()
        .iter()
        .filter(|item| item.kind.tag() == tag)
        .take(count)
        .map(|item| item.id)
        .collect();
    if ids.len() < count {
        return None;
    }
    picked.extend(ids);
    Some(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CraftAction {
    pub recipe: Recipe,
}

impl CraftAction {
    pub fn new(recipe: Recipe) -> Self {
        Self { recipe }
    }
}

impl ActionTransition for CraftAction {
    type Error = ActionError;
    /// Id of the crafted item.
    type Result = EntityId;

    fn pre_validate(&self, state: &DungeonState, _env: &DungeonEnv<'_>) -> Result<(), ActionError> {
        self.recipe
            .ingredients(&state.player.inventory)
            .map(|_| ())
            .ok_or(ActionError::InsufficientResources {
                recipe: self.recipe,
            })
    }

    fn apply(&self, state: &mut DungeonState, _env: &DungeonEnv<'_>) -> Result<EntityId, ActionError> {
        let ingredients = self
            .recipe
            .ingredients(&state.player.inventory)
            .ok_or(ActionError::InsufficientResources {
                recipe: self.recipe,
            })?;
        let id = state.allocate_entity_id()?;

        for ingredient in &ingredients {
            state.player.inventory.remove(*ingredient);
        }
        state
            .player
            .inventory
            .push(Item::new(id, self.recipe.product()));

        debug!(recipe = %self.recipe, item = %id, consumed = ingredients.len(), "item crafted");
        Ok(id)
    }
}
