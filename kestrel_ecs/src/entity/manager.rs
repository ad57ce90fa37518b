//! Utilities for managing entities and their components.

use std::collections::BTreeMap;

use slotmap::SlotMap;

use crate::component::{
    downcast, Component, ComponentInfo, ComponentRegistry, ComponentTag, ErasedComponent,
};
use crate::error::{EcsError, Result};

use super::{Entity, EntityBuilder, EntityEntry};

/// Observer of structural changes of entities.
///
/// [`EntityManager`] calls it synchronously from every mutating operation,
/// after the change was applied. All methods do nothing by default.
///
pub trait EntityObserver {
    /// Called when new entity was added, with all of its components.
    fn entity_added(&mut self, _entity: Entity, _entry: &EntityEntry) {}

    /// Called when the entity was removed. Entry still holds all of its components.
    fn entity_removed(&mut self, _entity: Entity, _entry: &EntityEntry) {}

    /// Called when component with the tag was attached to the entity.
    fn component_added(&mut self, _entity: Entity, _entry: &EntityEntry, _tag: ComponentTag) {}

    /// Called when component with the tag was detached from the entity.
    fn component_removed(&mut self, _entity: Entity, _entry: &EntityEntry, _tag: ComponentTag) {}
}

/// Observer which ignores all changes.
impl EntityObserver for () {}

/// Manager of all entities of ECS.
///
/// Owns entities together with their components
/// and the registry of component types.
///
#[derive(Default)]
pub struct EntityManager {
    entities: SlotMap<Entity, EntityEntry>,
    /// Entities sorted by the world insertion order.
    order: BTreeMap<u64, Entity>,
    next_order: u64,
    registry: ComponentRegistry,
}

impl EntityManager {
    /// Creates new entity manager without entities.
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            order: BTreeMap::new(),
            next_order: 0,
            registry: ComponentRegistry::new(),
        }
    }

    /// Registry of all component types attached to entities of this manager.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Mutable registry of component types.
    pub fn registry_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.registry
    }

    /// Creates new entity without components.
    pub fn spawn(&mut self, observer: &mut dyn EntityObserver) -> Entity {
        let entry = EntityEntry::new(None, self.next_order());
        self.store(entry, observer)
    }

    /// Adds entity built by the builder.
    ///
    /// # Errors
    ///
    /// An error is returned if the builder contains two components of the same type
    /// or if the type of some component collides with already registered one.
    ///
    pub fn insert(
        &mut self,
        builder: EntityBuilder,
        observer: &mut dyn EntityObserver,
    ) -> Result<Entity> {
        if let Some(tag) = builder.duplicate_tag() {
            return Err(EcsError::DuplicateComponentType { entity: None, tag });
        }
        let infos: Vec<_> = builder
            .components
            .iter()
            .map(|component| ComponentInfo::of_erased(component.as_ref()))
            .collect();
        for info in &infos {
            self.registry.check(info)?;
        }
        for info in infos {
            self.registry.register_info(info)?;
        }

        let mut entry = EntityEntry::new(builder.name, self.next_order());
        for component in builder.components {
            entry.insert(component);
        }
        Ok(self.store(entry, observer))
    }

    /// Removes the entity with all of its components.
    ///
    /// Returns data of the removed entity.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity is not managed by this manager.
    ///
    pub fn remove(
        &mut self,
        entity: Entity,
        observer: &mut dyn EntityObserver,
    ) -> Result<EntityEntry> {
        let entry = self
            .entities
            .remove(entity)
            .ok_or(EcsError::UnknownEntity(entity))?;
        self.order.remove(&entry.order());
        observer.entity_removed(entity, &entry);
        log::trace!("removed entity {:?}", entity);
        Ok(entry)
    }

    /// Removes all entities, in insertion order.
    ///
    /// Returns count of removed entities.
    ///
    pub fn clear(&mut self, observer: &mut dyn EntityObserver) -> usize {
        let order = std::mem::take(&mut self.order);
        let count = order.len();
        for entity in order.into_values() {
            if let Some(entry) = self.entities.remove(entity) {
                observer.entity_removed(entity, &entry);
            }
        }
        self.entities.clear();
        count
    }

    /// Attaches the component to the entity.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity is unknown, if component of the same type
    /// is already attached or if the type of the component collides with already registered one.
    ///
    pub fn attach(
        &mut self,
        entity: Entity,
        component: Box<dyn ErasedComponent>,
        observer: &mut dyn EntityObserver,
    ) -> Result<()> {
        let info = ComponentInfo::of_erased(component.as_ref());
        let entry = self
            .entities
            .get_mut(entity)
            .ok_or(EcsError::UnknownEntity(entity))?;
        if entry.has(info.tag) {
            return Err(EcsError::DuplicateComponentType {
                entity: Some(entity),
                tag: info.tag,
            });
        }
        self.registry.register_info(info)?;

        entry.insert(component);
        observer.component_added(entity, entry, info.tag);
        Ok(())
    }

    /// Attaches the component to the entity, replacing the attached one of the same type.
    ///
    /// Returns previously attached component, if any.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity is unknown
    /// or if the type of the component collides with already registered one.
    ///
    pub fn replace(
        &mut self,
        entity: Entity,
        component: Box<dyn ErasedComponent>,
        observer: &mut dyn EntityObserver,
    ) -> Result<Option<Box<dyn ErasedComponent>>> {
        let info = ComponentInfo::of_erased(component.as_ref());
        let entry = self
            .entities
            .get_mut(entity)
            .ok_or(EcsError::UnknownEntity(entity))?;
        self.registry.register_info(info)?;

        let previous = entry.insert(component);
        if previous.is_none() {
            observer.component_added(entity, entry, info.tag);
        }
        Ok(previous)
    }

    /// Detaches component with the tag from the entity.
    ///
    /// Returns detached component.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity is unknown or if it has no component with the tag.
    ///
    pub fn detach(
        &mut self,
        entity: Entity,
        tag: ComponentTag,
        observer: &mut dyn EntityObserver,
    ) -> Result<Box<dyn ErasedComponent>> {
        let entry = self
            .entities
            .get_mut(entity)
            .ok_or(EcsError::UnknownEntity(entity))?;
        let component = entry
            .remove(tag)
            .ok_or(EcsError::ComponentNotAttached { entity, tag })?;
        observer.component_removed(entity, entry, tag);
        Ok(component)
    }

    /// Detaches component of type `T` from the entity.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity is unknown, if it has no component of type `T`
    /// or if the tag of `T` is bound to another type.
    ///
    pub fn take<T>(&mut self, entity: Entity, observer: &mut dyn EntityObserver) -> Result<T>
    where
        T: Component,
    {
        self.registry.check(&ComponentInfo::of::<T>())?;
        let component = self.detach(entity, T::TYPE, observer)?;
        downcast(component).ok_or(EcsError::ComponentNotAttached {
            entity,
            tag: T::TYPE,
        })
    }

    /// Attaches the component of type `T` to the entity, replacing the attached one.
    ///
    /// Returns previously attached component, if any.
    ///
    /// # Errors
    ///
    /// An error is returned if the entity is unknown or if the tag of `T` is bound to another type.
    ///
    pub fn put<T>(
        &mut self,
        entity: Entity,
        component: T,
        observer: &mut dyn EntityObserver,
    ) -> Result<Option<T>>
    where
        T: Component,
    {
        let previous = self.replace(entity, Box::new(component), observer)?;
        Ok(previous.and_then(downcast::<T>))
    }

    /// Returns `true` if the entity is managed by this manager.
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Retrieves data of the entity.
    pub fn get(&self, entity: Entity) -> Option<&EntityEntry> {
        self.entities.get(entity)
    }

    /// Retrieves mutable data of the entity.
    ///
    /// Component set cannot be changed through the entry,
    /// only values of attached components.
    ///
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut EntityEntry> {
        self.entities.get_mut(entity)
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    pub fn component<T>(&self, entity: Entity) -> Option<&T>
    where
        T: Component,
    {
        self.get(entity)?.get()
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    pub fn component_mut<T>(&mut self, entity: Entity) -> Option<&mut T>
    where
        T: Component,
    {
        self.get_mut(entity)?.get_mut()
    }

    /// Returns the first entity with the name, in insertion order.
    pub fn find_by_name(&self, name: &str) -> Option<Entity> {
        self.iter()
            .find(|(_, entry)| entry.name() == Some(name))
            .map(|(entity, _)| entity)
    }

    /// Returns iterator over all entities with their data, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &EntityEntry)> {
        let entities = &self.entities;
        self.order
            .values()
            .filter_map(move |&entity| entities.get(entity).map(|entry| (entity, entry)))
    }

    /// Returns iterator over all entities, in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.order.values().copied()
    }

    /// Number of managed entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if there are no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn next_order(&mut self) -> u64 {
        let order = self.next_order;
        self.next_order += 1;
        order
    }

    fn store(&mut self, entry: EntityEntry, observer: &mut dyn EntityObserver) -> Entity {
        let order = entry.order();
        let entity = self.entities.insert(entry);
        self.order.insert(order, entity);
        if let Some(entry) = self.entities.get(entity) {
            observer.entity_added(entity, entry);
        }
        log::trace!("added entity {:?}", entity);
        entity
    }
}
