//! Utilities for *components* in ECS.

use std::any::{Any, TypeId};

pub use registry::*;

mod registry;
mod tests;

/// Unique string tag which identifies the type of a *component*.
pub type ComponentTag = &'static str;

/// Objects of this trait represent *component* of ECS.
///
/// Components should be mostly plain data. Every component type must have
/// a tag unique across the whole world: two different Rust types
/// with the same tag are rejected on registration.
///
/// ```
/// use kestrel_ecs::Component;
///
/// struct Health(u32);
///
/// impl Component for Health {
///     const TYPE: &'static str = "health";
/// }
/// ```
///
pub trait Component: Any {
    /// Type tag of this component.
    const TYPE: ComponentTag;
}

/// Type-erased *component* which is stored inside of an entity.
///
/// Implemented for all [`Component`]s, there is no need to implement it by hand.
///
pub trait ErasedComponent: Any {
    /// Type tag of the underlying component.
    fn type_tag(&self) -> ComponentTag;

    /// Name of the underlying Rust type.
    fn type_name(&self) -> &'static str;

    /// Identifier of the underlying Rust type.
    fn component_type_id(&self) -> TypeId;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T> ErasedComponent for T
where
    T: Component,
{
    fn type_tag(&self) -> ComponentTag {
        T::TYPE
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn component_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Converts boxed type-erased component back into the concrete type.
pub(crate) fn downcast<T>(component: Box<dyn ErasedComponent>) -> Option<T>
where
    T: Component,
{
    component.into_any().downcast::<T>().ok().map(|boxed| *boxed)
}
