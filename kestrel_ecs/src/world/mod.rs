//! Utilities for storage of ECS.

use crate::component::{Component, ComponentTag};
use crate::entity::{Entity, EntityBuilder, EntityEntry, EntityManager};
use crate::error::Result;
use crate::query::{Query, QueryId, QueryManager};
use crate::system::{System, SystemManager, SystemPhase};


/// Storage for entities, components and systems of ECS.
///
/// Every structural change goes through the world, which reports it
/// to the query manager before returning, so queries are always up to date.
///
#[derive(Default)]
pub struct World {
    /// Storage for all entities with their components.
    entities: EntityManager,
    /// Live queries over entities.
    queries: QueryManager,
    /// Storage for all systems.
    systems: SystemManager,
    /// Verify and repair queries before each phase.
    validation: bool,
}

impl World {
    /// Creates new empty world.
    pub fn new() -> Self {
        Self {
            entities: EntityManager::new(),
            queries: QueryManager::new(),
            systems: SystemManager::new(),
            validation: false,
        }
    }

    /// Enables or disables validation of queries before each phase.
    pub fn with_validation(mut self, validation: bool) -> Self {
        self.validation = validation;
        self
    }

    /// Enables or disables validation of queries before each phase.
    pub fn set_validation(&mut self, validation: bool) {
        self.validation = validation;
    }

    /// Returns `true` if queries are validated before each phase.
    pub fn validation(&self) -> bool {
        self.validation
    }

    /// Read access to entities of the world.
    pub fn entity_manager(&self) -> &EntityManager {
        &self.entities
    }

    /// Read access to queries of the world.
    pub fn query_manager(&self) -> &QueryManager {
        &self.queries
    }

    /// Read access to systems of the world.
    pub fn system_manager(&self) -> &SystemManager {
        &self.systems
    }

    /// Registers component type `T`.
    ///
    /// Types are registered automatically when a component is attached for the first time,
    /// but queries and systems can only require already registered types.
    ///
    /// # Errors
    ///
    /// An error is returned if the tag of `T` is already bound to another type.
    ///
    pub fn register_component<T>(&mut self) -> Result<()>
    where
        T: Component,
    {
        self.entities.registry_mut().register::<T>()
    }

    /// Creates new entity without components.
    pub fn spawn(&mut self) -> Entity {
        self.entities.spawn(&mut self.queries)
    }

    /// Adds entity built by the builder.
    ///
    /// # Errors
    ///
    /// See [`EntityManager::insert`].
    ///
    pub fn add_entity(&mut self, builder: EntityBuilder) -> Result<Entity> {
        self.entities.insert(builder, &mut self.queries)
    }

    /// Removes the entity with all of its components from the world and all queries.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity is unknown.
    ///
    pub fn remove_entity(&mut self, entity: Entity) -> Result<EntityEntry> {
        self.entities.remove(entity, &mut self.queries)
    }

    /// Returns `true` if the entity belongs to this world.
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(entity)
    }

    /// Retrieves data of the entity.
    pub fn entity(&self, entity: Entity) -> Option<&EntityEntry> {
        self.entities.get(entity)
    }

    /// Returns the first entity with the name.
    pub fn find_by_name(&self, name: &str) -> Option<Entity> {
        self.entities.find_by_name(name)
    }

    /// Returns iterator over all entities, in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.entities()
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
            .attach(entity, Box::new(component), &mut self.queries)
    }

    /// Attaches the component to the entity, replacing the attached one of the same type.
    ///
    /// Returns previously attached component, if any.
    ///
    /// # Errors
    ///
    /// See [`EntityManager::put`].
    ///
    pub fn replace_component<T>(&mut self, entity: Entity, component: T) -> Result<Option<T>>
    where
        T: Component,
    {
        self.entities.put(entity, component, &mut self.queries)
    }

    /// Detaches component of type `T` from the entity.
    ///
    /// Returns detached component.
    ///
    /// # Errors
    ///
    /// See [`EntityManager::take`].
    ///
    pub fn remove_component<T>(&mut self, entity: Entity) -> Result<T>
    where
        T: Component,
    {
        self.entities.take(entity, &mut self.queries)
    }

    /// Detaches component with the tag from the entity.
    ///
    /// # Errors
    ///
    /// See [`EntityManager::detach`].
    ///
    pub fn remove_component_by_tag(&mut self, entity: Entity, tag: ComponentTag) -> Result<()> {
        self.entities
            .detach(entity, tag, &mut self.queries)
            .map(drop)
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    pub fn get_component<T>(&self, entity: Entity) -> Option<&T>
    where
        T: Component,
    {
        self.entities.component(entity)
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    pub fn get_component_mut<T>(&mut self, entity: Entity) -> Option<&mut T>
    where
        T: Component,
    {
        self.entities.component_mut(entity)
    }

    /// Returns identifier of the live query over the types.
    ///
    /// # Errors
    ///
    /// See [`QueryManager::get_query`].
    ///
    pub fn query(&mut self, tags: &[ComponentTag]) -> Result<QueryId> {
        self.queries.get_query(tags, &self.entities)
    }

    /// Retrieves the query by its identifier.
    pub fn get_query(&self, id: QueryId) -> Option<&Query> {
        self.queries.query(id)
    }

    /// Entities currently matching the query, in insertion order.
    pub fn query_entities(&self, id: QueryId) -> Vec<Entity> {
        self.queries
            .query(id)
            .map(|query| query.entities().collect())
            .unwrap_or_default()
    }

    /// Registers the system.
    ///
    /// # Errors
    ///
    /// See [`SystemManager::add`].
    ///
    pub fn add_system<S>(&mut self, system: S) -> Result<()>
    where
        S: System,
    {
        self.systems.add(system, &mut self.queries, &self.entities)
    }

    /// Removes system of type `S`, returning it back.
    ///
    /// # Errors
    ///
    /// See [`SystemManager::remove`].
    ///
    pub fn remove_system<S>(&mut self) -> Result<S>
    where
        S: System,
    {
        self.systems.remove()
    }

    /// Removes all systems from the world.
    pub fn clear_systems(&mut self) {
        self.systems.clear();
    }

    /// Retrieves an immutable reference to system of type `S`.
    pub fn system<S>(&self) -> Option<&S>
    where
        S: System,
    {
        self.systems.get()
    }

    /// Retrieves a mutable reference to system of type `S`.
    pub fn system_mut<S>(&mut self) -> Option<&mut S>
    where
        S: System,
    {
        self.systems.get_mut()
    }

    /// Updates all systems of the phase.
    ///
    /// `delta` is the time elapsed since the previous tick, in milliseconds.
    /// Returns count of updated systems.
    ///
    pub fn update(&mut self, phase: SystemPhase, delta: f32) -> usize {
        if self.validation {
            let repaired = self.queries.refresh(&self.entities);
            if repaired > 0 {
                log::warn!("repaired {} query entries before {:?} phase", repaired, phase);
            }
        }
        self.systems
            .update(phase, delta, &mut self.entities, &mut self.queries)
    }

    /// Updates systems of all phases, in order of [`SystemPhase::ALL`].
    ///
    /// Returns count of updated systems.
    ///
    pub fn tick(&mut self, delta: f32) -> usize {
        SystemPhase::ALL
            .iter()
            .map(|&phase| self.update(phase, delta))
            .sum()
    }

    /// Detaches all systems and entities, drops all queries and registered component types.
    ///
    /// Nothing is carried over: the world is the same as a new one.
    ///
    pub fn clear(&mut self) {
        let systems = self.systems.clear();
        let entities = self.entities.clear(&mut self.queries);
        self.entities = EntityManager::new();
        self.queries.clear();
        log::debug!(
            "world cleared: {} systems and {} entities removed",
            systems,
            entities,
        );
    }
}
