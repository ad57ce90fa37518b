//! Utilities for registration of component types.

use std::any::TypeId;
use std::collections::HashMap;

use crate::error::{EcsError, Result};

use super::{Component, ComponentTag, ErasedComponent};

/// Information about the Rust type bound to a component tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
    /// Tag of the component type.
    pub tag: ComponentTag,
    /// Identifier of the Rust type.
    pub type_id: TypeId,
    /// Name of the Rust type, for diagnostics only.
    pub type_name: &'static str,
}

impl ComponentInfo {
    /// Creates component info of type `T`.
    pub fn of<T>() -> Self
    where
        T: Component,
    {
        Self {
            tag: T::TYPE,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Creates component info from the type-erased component.
    pub fn of_erased(component: &dyn ErasedComponent) -> Self {
        Self {
            tag: component.type_tag(),
            type_id: component.component_type_id(),
            type_name: component.type_name(),
        }
    }
}

/// Registry of all component types known to the world.
///
/// Binds every tag to exactly one Rust type.
///
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    types: HashMap<ComponentTag, ComponentInfo>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Registers component type `T`.
    ///
    /// Registering the same type twice is a no-op.
    ///
    /// # Errors
    ///
    /// An error is returned if the tag of `T` is already bound to another type.
    ///
    pub fn register<T>(&mut self) -> Result<()>
    where
        T: Component,
    {
        self.register_info(ComponentInfo::of::<T>())
    }

    /// Registers component type described by `info`.
    ///
    /// # Errors
    ///
    /// An error is returned if the tag is already bound to another type.
    ///
    pub fn register_info(&mut self, info: ComponentInfo) -> Result<()> {
        match self.types.get(info.tag) {
            Some(registered) if registered.type_id == info.type_id => Ok(()),
            Some(registered) => Err(EcsError::ComponentTypeCollision {
                tag: info.tag,
                registered: registered.type_name,
                rejected: info.type_name,
            }),
            None => {
                log::debug!("registered component `{}` as `{}`", info.type_name, info.tag);
                self.types.insert(info.tag, info);
                Ok(())
            }
        }
    }

    /// Checks that registering `info` would not collide with an existing binding.
    pub(crate) fn check(&self, info: &ComponentInfo) -> Result<()> {
        match self.types.get(info.tag) {
            Some(registered) if registered.type_id != info.type_id => {
                Err(EcsError::ComponentTypeCollision {
                    tag: info.tag,
                    registered: registered.type_name,
                    rejected: info.type_name,
                })
            }
            _ => Ok(()),
        }
    }

    /// Returns `true` if the tag is bound to some type.
    pub fn contains(&self, tag: &str) -> bool {
        self.types.contains_key(tag)
    }

    /// Retrieves information about the type bound to the tag.
    pub fn get(&self, tag: &str) -> Option<&ComponentInfo> {
        self.types.get(tag)
    }

    /// Returns iterator over all registered tags.
    pub fn tags(&self) -> impl Iterator<Item = ComponentTag> + '_ {
        self.types.keys().copied()
    }

    /// Number of registered component types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no component type was registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
