//! Utilities for access to the world from inside of *systems*.

use std::any::{type_name, TypeId};

use crate::component::{Component, ComponentTag};
use crate::entity::{Entity, EntityBuilder, EntityEntry, EntityManager};
use crate::error::Result;
use crate::query::QueryManager;

use super::System;

/// Changes of the system set requested by systems during an update pass.
#[derive(Debug, Default)]
pub(crate) struct SystemCommands {
    pub(crate) removed: Vec<(TypeId, &'static str)>,
}

/// Access to the world given to the system during its update.
///
/// Every structural change made through the context is reflected
/// in all queries before the call returns.
///
pub struct SystemContext<'a> {
    entities: &'a mut EntityManager,
    queries: &'a mut QueryManager,
    matches: &'a [Entity],
    commands: &'a mut SystemCommands,
}

impl<'a> SystemContext<'a> {
    pub(crate) fn new(
        entities: &'a mut EntityManager,
        queries: &'a mut QueryManager,
        matches: &'a [Entity],
        commands: &'a mut SystemCommands,
    ) -> Self {
        Self {
            entities,
            queries,
            matches,
            commands,
        }
    }

    /// Entities which matched the types of the system when its update started,
    /// in world insertion order.
    pub fn entities(&self) -> &[Entity] {
        self.matches
    }

    /// Manager of all entities of the world.
    pub fn entity_manager(&self) -> &EntityManager {
        &*self.entities
    }

    /// Retrieves data of the entity.
    pub fn entity(&self, entity: Entity) -> Option<&EntityEntry> {
        self.entities.get(entity)
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    pub fn get<T>(&self, entity: Entity) -> Option<&T>
    where
        T: Component,
    {
        self.entities.component(entity)
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    pub fn get_mut<T>(&mut self, entity: Entity) -> Option<&mut T>
    where
        T: Component,
    {
        self.entities.component_mut(entity)
    }

    /// Adds new entity to the world.
    ///
    /// # Errors
    ///
    /// See [`EntityManager::insert`].
    ///
    pub fn spawn(&mut self, builder: EntityBuilder) -> Result<Entity> {
        self.entities.insert(builder, &mut *self.queries)
    }

    /// Removes the entity from the world.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity is unknown.
    ///
    pub fn despawn(&mut self, entity: Entity) -> Result<()> {
        self.entities.remove(entity, &mut *self.queries).map(drop)
    }

    /// Attaches the component to the entity.
    ///
    /// # Errors
    ///
    /// See [`EntityManager::attach`].
    ///
    pub fn add_component<T>(&mut self, entity: Entity, component: T) -> Result<()>
    where
        T: Component,
    {
        self.entities
            .attach(entity, Box::new(component), &mut *self.queries)
    }

    /// Detaches component of type `T` from the entity.
    ///
    /// # Errors
    ///
    /// See [`EntityManager::take`].
    ///
    pub fn remove_component<T>(&mut self, entity: Entity) -> Result<T>
    where
        T: Component,
    {
        self.entities.take(entity, &mut *self.queries)
    }

    /// Returns entities which own components of all the types, in world insertion order.
    ///
    /// # Errors
    ///
    /// An error is returned if some type was never registered.
    ///
    pub fn query(&mut self, tags: &[ComponentTag]) -> Result<Vec<Entity>> {
        let id = self.queries.get_query(tags, &*self.entities)?;
        let query = self.queries.query(id);
        Ok(query.map(|query| query.entities().collect()).unwrap_or_default())
    }

    /// Removes system of type `S` from the world.
    ///
    /// Removed system is not updated anymore, even during the current pass,
    /// including the calling system itself. Removing a system which is not
    /// registered leaves the world unchanged and logs a warning when the request is applied.
    ///
    pub fn remove_system<S>(&mut self)
    where
        S: System,
    {
        self.commands
            .removed
            .push((TypeId::of::<S>(), type_name::<S>()));
    }
}
