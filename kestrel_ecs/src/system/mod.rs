//! Utilities for *systems* in ECS.

use std::any::Any;

use crate::component::ComponentTag;

pub use context::*;
pub use manager::*;

mod context;
mod manager;
mod tests;

/// Stage of the tick in which the system runs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SystemPhase {
    /// Game logic: movement, behaviors, collisions.
    Update,

    /// Drawing of entities, runs after all systems of update phase.
    Draw,
}

impl SystemPhase {
    /// All phases in the order of execution during one tick.
    pub const ALL: [SystemPhase; 2] = [SystemPhase::Update, SystemPhase::Draw];
}

impl Default for SystemPhase {
    fn default() -> Self {
        Self::Update
    }
}

/// Lifecycle of the system **inside of ECS**.
///
/// Unregistered system is simply not known by the [`SystemManager`].
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SystemState {
    /// System was added, but have not been updated yet.
    Registered,

    /// System was initialized and receives updates.
    Active,

    /// System was removed and will never be updated again.
    Removed,
}

/// Objects of this trait represent *system* of ECS.
///
/// ```
/// use kestrel_ecs::{Component, System, SystemContext};
///
/// struct Lifetime(f32);
///
/// impl Component for Lifetime {
///     const TYPE: &'static str = "lifetime";
/// }
///
/// struct LifetimeSystem;
///
/// impl System for LifetimeSystem {
///     fn types(&self) -> &[&'static str] {
///         &["lifetime"]
///     }
///
///     fn update(&mut self, ctx: &mut SystemContext<'_>, delta: f32) {
///         for entity in ctx.entities().to_vec() {
///             let expired = match ctx.get_mut::<Lifetime>(entity) {
///                 Some(lifetime) => {
///                     lifetime.0 -= delta;
///                     lifetime.0 <= 0.0
///                 }
///                 None => false,
///             };
///             if expired {
///                 let _ = ctx.despawn(entity);
///             }
///         }
///     }
/// }
/// ```
///
pub trait System: Any {
    /// Component types which will be handled by this system.
    ///
    /// Read once on registration, later changes have no effect.
    ///
    fn types(&self) -> &[ComponentTag];

    /// Phase in which this system runs.
    fn phase(&self) -> SystemPhase {
        SystemPhase::Update
    }

    /// Priority of this system inside of its phase, lower runs first.
    fn priority(&self) -> i32 {
        0
    }

    /// Called once right before the first update of this system.
    fn initialize(&mut self, _ctx: &mut SystemContext<'_>) {}

    /// Handles all entities matching the types of this system.
    ///
    /// `delta` is the time elapsed since the previous tick, in milliseconds.
    ///
    fn update(&mut self, ctx: &mut SystemContext<'_>, delta: f32);

    /// Called once when this system was removed.
    fn teardown(&mut self) {}
}

/// Type-erased system which can be converted back into the concrete type.
pub(crate) trait ErasedSystem: System {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<S> ErasedSystem for S
where
    S: System,
{
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
