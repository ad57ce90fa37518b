//! Utilities for *entities* in ECS.

use std::collections::BTreeMap;
use std::fmt;

use slotmap::new_key_type;

use crate::component::{Component, ComponentTag, ErasedComponent};

pub use builder::*;
pub use manager::*;

mod builder;
mod manager;

new_key_type! {
    /// Unique identifier of the *entity* of ECS.
    pub struct Entity;
}

/// Data of the *entity* owned by the [`EntityManager`].
///
/// Holds at most one component per type tag.
///
pub struct EntityEntry {
    name: Option<String>,
    components: BTreeMap<ComponentTag, Box<dyn ErasedComponent>>,
    version: u64,
    order: u64,
}

impl EntityEntry {
    pub(crate) fn new(name: Option<String>, order: u64) -> Self {
        Self {
            name,
            components: BTreeMap::new(),
            version: 0,
            order,
        }
    }

    /// Optional name of the entity.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Version of the component set, increased on every attach, detach or replace.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Position of the entity in the world insertion sequence.
    pub fn order(&self) -> u64 {
        self.order
    }

    /// Returns `true` if component with the tag is attached.
    pub fn has(&self, tag: &str) -> bool {
        self.components.contains_key(tag)
    }

    /// Returns `true` if components with all of the tags are attached.
    pub fn has_all(&self, tags: &[ComponentTag]) -> bool {
        tags.iter().all(|tag| self.has(tag))
    }

    /// Returns iterator over tags of all attached components, sorted.
    pub fn tags(&self) -> impl Iterator<Item = ComponentTag> + '_ {
        self.components.keys().copied()
    }

    /// Number of attached components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if no component is attached.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Retrieves an immutable reference to the component of type `T`.
    pub fn get<T>(&self) -> Option<&T>
    where
        T: Component,
    {
        self.components.get(T::TYPE)?.as_any().downcast_ref()
    }

    /// Retrieves a mutable reference to the component of type `T`.
    pub fn get_mut<T>(&mut self) -> Option<&mut T>
    where
        T: Component,
    {
        self.components.get_mut(T::TYPE)?.as_any_mut().downcast_mut()
    }

    /// Retrieves type-erased component by its tag.
    pub fn get_erased(&self, tag: &str) -> Option<&dyn ErasedComponent> {
        self.components.get(tag).map(|boxed| boxed.as_ref())
    }

    pub(crate) fn insert(
        &mut self,
        component: Box<dyn ErasedComponent>,
    ) -> Option<Box<dyn ErasedComponent>> {
        self.version += 1;
        self.components.insert(component.type_tag(), component)
    }

    pub(crate) fn remove(&mut self, tag: &str) -> Option<Box<dyn ErasedComponent>> {
        let component = self.components.remove(tag)?;
        self.version += 1;
        Some(component)
    }
}

impl fmt::Debug for EntityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityEntry")
            .field("name", &self.name)
            .field("components", &self.components.keys().collect::<Vec<_>>())
            .field("version", &self.version)
            .field("order", &self.order)
            .finish()
    }
}
