//! Utilities for building *entities* before they are added to the world.

use crate::component::{Component, ComponentTag, ErasedComponent};

/// Entity which is not managed by any world yet.
///
/// Components are moved into the builder and then into the world,
/// so each component is owned by exactly one entity.
///
/// ```
/// use kestrel_ecs::{Component, EntityBuilder};
///
/// struct Health(u32);
///
/// impl Component for Health {
///     const TYPE: &'static str = "health";
/// }
///
/// let builder = EntityBuilder::new().named("player").with(Health(100));
/// assert!(builder.has("health"));
/// ```
///
#[derive(Default)]
pub struct EntityBuilder {
    pub(crate) name: Option<String>,
    pub(crate) components: Vec<Box<dyn ErasedComponent>>,
}

impl EntityBuilder {
    /// Creates new builder of an entity without components.
    pub fn new() -> Self {
        Self {
            name: None,
            components: Vec::new(),
        }
    }

    /// Sets the name of the entity.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds component to the entity.
    pub fn with<T>(mut self, component: T) -> Self
    where
        T: Component,
    {
        self.components.push(Box::new(component));
        self
    }

    /// Adds type-erased component to the entity.
    pub fn with_erased(mut self, component: Box<dyn ErasedComponent>) -> Self {
        self.components.push(component);
        self
    }

    /// Returns `true` if component with the tag was added to the builder.
    pub fn has(&self, tag: &str) -> bool {
        self.components
            .iter()
            .any(|component| component.type_tag() == tag)
    }

    /// Returns iterator over tags of added components, in insertion order.
    pub fn tags(&self) -> impl Iterator<Item = ComponentTag> + '_ {
        self.components.iter().map(|component| component.type_tag())
    }

    /// Tag of the first component which was added more than once, if any.
    pub(crate) fn duplicate_tag(&self) -> Option<ComponentTag> {
        self.tags()
            .enumerate()
            .find(|&(index, tag)| self.tags().take(index).any(|prev| prev == tag))
            .map(|(_, tag)| tag)
    }
}
