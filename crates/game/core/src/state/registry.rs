//! Entity registry: the sole owner of every placed entity.
//!
//! Entities live in an id-keyed arena. A position index mirrors their
//! positions and is updated on every add, remove and relocation, so tile
//! lookups never scan the whole dungeon.

use std::collections::BTreeMap;

use super::StateError;
use super::types::{Entity, EntityId, EntityKind, Position};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Entity>", into = "Vec<Entity>"))]
pub struct EntityRegistry {
    entities: BTreeMap<EntityId, Entity>,
    by_position: BTreeMap<Position, Vec<EntityId>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All entities in ascending id order.
    pub fn all_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Entities on `position`, in the order they arrived there.
    pub fn entities_at(&self, position: Position) -> impl Iterator<Item = &Entity> {
        self.ids_at(position)
            .iter()
            .filter_map(|id| self.entities.get(id))
    }

    pub fn ids_at(&self, position: Position) -> &[EntityId] {
        self.by_position
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_vacant(&self, position: Position) -> bool {
        self.ids_at(position).is_empty()
    }

    /// First entity on `position` matching `predicate`.
    pub fn find_at(
        &self,
        position: Position,
        predicate: impl Fn(&EntityKind) -> bool,
    ) -> Option<&Entity> {
        self.entities_at(position)
            .find(|entity| predicate(&entity.kind))
    }

    pub fn any_at(&self, position: Position, predicate: impl Fn(&EntityKind) -> bool) -> bool {
        self.find_at(position, predicate).is_some()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Mutable access for kind and health changes. Use [`Self::relocate`] to move.
    pub fn kind_mut(&mut self, id: EntityId) -> Option<&mut EntityKind> {
        self.entities.get_mut(&id).map(|entity| &mut entity.kind)
    }

    pub fn add(&mut self, entity: Entity) -> Result<(), StateError> {
        if self.entities.contains_key(&entity.id) {
            return Err(StateError::DuplicateEntity { id: entity.id });
        }
        self.by_position
            .entry(entity.position)
            .or_default()
            .push(entity.id);
        self.entities.insert(entity.id, entity);
        Ok(())
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(&id)?;
        self.unindex(entity.position, id);
        Some(entity)
    }

    pub fn relocate(&mut self, id: EntityId, destination: Position) -> Result<Position, StateError> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(StateError::UnknownEntity { id })?;
        let origin = entity.position;
        if origin == destination {
            return Ok(origin);
        }
        entity.position = destination;
        self.unindex(origin, id);
        self.by_position.entry(destination).or_default().push(id);
        Ok(origin)
    }

    /// Iterates every entity matching `predicate`, in id order.
    pub fn filter(
        &self,
        predicate: impl Fn(&EntityKind) -> bool,
    ) -> impl Iterator<Item = &Entity> {
        self.entities
            .values()
            .filter(move |entity| predicate(&entity.kind))
    }

    pub fn count(&self, predicate: impl Fn(&EntityKind) -> bool) -> usize {
        self.filter(predicate).count()
    }

    fn unindex(&mut self, position: Position, id: EntityId) {
        if let Some(slot) = self.by_position.get_mut(&position) {
            slot.retain(|occupant| *occupant != id);
            if slot.is_empty() {
                self.by_position.remove(&position);
            }
        }
    }
}

impl TryFrom<Vec<Entity>> for EntityRegistry {
    type Error = StateError;

    fn try_from(entities: Vec<Entity>) -> Result<Self, Self::Error> {
        let mut registry = Self::new();
        for entity in entities {
            registry.add(entity)?;
        }
        Ok(registry)
    }
}

impl From<EntityRegistry> for Vec<Entity> {
    fn from(registry: EntityRegistry) -> Self {
        registry.entities.into_values().collect()
    }
}
