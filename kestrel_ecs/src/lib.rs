//! Entity Component System (ECS) utilities for game engine.
//!
//! Components are tagged with unique string types, entities own at most one
//! component of each type, queries keep live sets of entities which own
//! all required types, and systems process those sets once per tick,
//! ordered by phase and priority.

pub use component::{Component, ComponentInfo, ComponentRegistry, ComponentTag, ErasedComponent};
pub use entity::{Entity, EntityBuilder, EntityEntry, EntityManager, EntityObserver};
pub use error::{EcsError, Result};
pub use query::{Query, QueryId, QueryManager};
pub use system::{System, SystemContext, SystemManager, SystemPhase, SystemState};
pub use world::World;

mod component;
mod entity;
mod error;
mod query;
mod system;
mod world;
