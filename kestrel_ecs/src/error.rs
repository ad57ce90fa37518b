//! Error types of ECS.

use thiserror::Error;

use crate::component::ComponentTag;
use crate::Entity;

/// Result of any fallible operation of ECS.
pub type Result<T> = std::result::Result<T, EcsError>;

/// Structural error returned synchronously by mutating operations of ECS.
///
/// When an operation returns an error, the world is left unchanged.
///
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EcsError {
    /// Entity is `None` when the duplicate was found in an [`EntityBuilder`](crate::EntityBuilder).
    #[error("component of type `{tag}` is attached twice")]
    DuplicateComponentType {
        entity: Option<Entity>,
        tag: ComponentTag,
    },

    #[error("entity {entity:?} owns no component of type `{tag}`")]
    ComponentNotAttached { entity: Entity, tag: ComponentTag },

    #[error("entity {0:?} is not managed by this world")]
    UnknownEntity(Entity),

    #[error("component type `{0}` was never registered")]
    UnknownComponentTag(String),

    #[error("component type `{tag}` is bound to `{registered}`, cannot bind it to `{rejected}`")]
    ComponentTypeCollision {
        tag: ComponentTag,
        registered: &'static str,
        rejected: &'static str,
    },

    #[error("system `{0}` is already registered")]
    SystemTypeCollision(&'static str),

    #[error("system `{0}` is not registered")]
    UnknownSystem(&'static str),
}
