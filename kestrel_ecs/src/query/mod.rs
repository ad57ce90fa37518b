//! Utilities for *queries* in ECS.
//!
//! Query is a live set of entities which own components of all required types.
//! It is kept up to date by the [`QueryManager`] on every structural change.

use std::collections::BTreeMap;

use slotmap::{new_key_type, SecondaryMap};

use crate::component::ComponentTag;
use crate::entity::{Entity, EntityEntry};

pub use manager::*;

mod manager;

new_key_type! {
    /// Unique identifier of the *query* of ECS.
    pub struct QueryId;
}

/// Live set of entities matching the fixed set of required component types.
#[derive(Debug)]
pub struct Query {
    tags: Box<[ComponentTag]>,
    /// Matching entities keyed by their world insertion order.
    matches: BTreeMap<u64, Entity>,
    members: SecondaryMap<Entity, u64>,
    generation: u64,
}

impl Query {
    pub(crate) fn new(tags: Box<[ComponentTag]>) -> Self {
        Self {
            tags,
            matches: BTreeMap::new(),
            members: SecondaryMap::new(),
            generation: 0,
        }
    }

    /// Required component types, sorted and without duplicates.
    pub fn tags(&self) -> &[ComponentTag] {
        &self.tags
    }

    /// Returns `true` if the entity owns components of all required types.
    pub fn matches(&self, entry: &EntityEntry) -> bool {
        entry.has_all(&self.tags)
    }

    /// Returns `true` if the entity is in the match set.
    pub fn contains(&self, entity: Entity) -> bool {
        self.members.contains_key(entity)
    }

    /// Returns iterator over matching entities, in world insertion order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.matches.values().copied()
    }

    /// Number of matching entities.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns `true` if no entity matches.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Counter which is increased every time the match set changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Adds or removes the entity according to its current components.
    pub(crate) fn update(&mut self, entity: Entity, entry: &EntityEntry) {
        if self.matches(entry) {
            self.insert(entity, entry.order());
        } else {
            self.remove(entry.order());
        }
    }

    pub(crate) fn insert(&mut self, entity: Entity, order: u64) {
        if self.matches.insert(order, entity).is_none() {
            self.members.insert(entity, order);
            self.generation += 1;
        }
    }

    pub(crate) fn remove(&mut self, order: u64) {
        if let Some(entity) = self.matches.remove(&order) {
            self.members.remove(entity);
            self.generation += 1;
        }
    }

    pub(crate) fn contains_order(&self, order: u64) -> bool {
        self.matches.contains_key(&order)
    }

    pub(crate) fn matched(&self) -> impl Iterator<Item = (u64, Entity)> + '_ {
        self.matches.iter().map(|(&order, &entity)| (order, entity))
    }

    pub(crate) fn clear(&mut self) {
        if !self.matches.is_empty() {
            self.matches.clear();
            self.members.clear();
            self.generation += 1;
        }
    }
}

/// Turns required component types into canonical form: sorted and without duplicates.
pub(crate) fn canonical_tags(tags: &[ComponentTag]) -> Box<[ComponentTag]> {
    let mut tags = tags.to_vec();
    tags.sort_unstable();
    tags.dedup();
    tags.into_boxed_slice()
}
