//! Utilities for *scenes* of the game.
//!
//! Scene owns exactly one ECS world. The world is filled lazily,
//! when the scene becomes active for the first time, and emptied
//! completely when the scene is left.

use crate::app::DeltaTime;
use crate::components::register_builtins;
use crate::ecs::World;
use crate::error::{Error, Result};


/// Game-specific part of the scene: fills its world with entities and systems.
///
/// Implemented for all closures `FnMut(&mut World) -> Result<()>`.
///
/// ```
/// use kestrel_core::ecs::World;
/// use kestrel_core::error::Result;
/// use kestrel_core::scene::Scene;
///
/// let scene = Scene::new("empty", |_: &mut World| -> Result<()> { Ok(()) });
/// assert!(!scene.is_initialized());
/// ```
///
pub trait SceneHandler {
    /// Called every time the scene becomes active.
    fn initialize(&mut self, world: &mut World) -> Result<()>;

    /// Called when the scene is left, right before its world is cleared.
    fn teardown(&mut self, _world: &mut World) {}
}

impl<F> SceneHandler for F
where
    F: FnMut(&mut World) -> Result<()>,
{
    fn initialize(&mut self, world: &mut World) -> Result<()> {
        self(world)
    }
}

/// Named scene of the game which owns its own world.
pub struct Scene {
    name: String,
    world: World,
    handler: Box<dyn SceneHandler>,
    initialized: bool,
}

impl Scene {
    /// Creates new scene with empty world.
    pub fn new<H>(name: impl Into<String>, handler: H) -> Self
    where
        H: SceneHandler + 'static,
    {
        Self {
            name: name.into(),
            world: World::new(),
            handler: Box::new(handler),
            initialized: false,
        }
    }

    /// Unique name of the scene.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// World owned by the scene.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world owned by the scene.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Returns `true` if the world of the scene was filled by its handler.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Enables or disables validation of queries of the world.
    pub fn set_validation(&mut self, validation: bool) {
        self.world.set_validation(validation);
    }

    /// Registers built-in components and fills the world by the handler.
    ///
    /// Does nothing if the scene is already initialized.
    ///
    /// # Errors
    ///
    /// An error of the handler is returned as is, the world is left empty.
    ///
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        let result = register_builtins(&mut self.world)
            .map_err(Error::from)
            .and_then(|_| self.handler.initialize(&mut self.world));
        if let Err(error) = result {
            log::error!("scene `{}` initialization error: {}", self.name, error);
            self.world.clear();
            return Err(error);
        }
        self.initialized = true;
        log::info!(
            "scene `{}` initialized with {} entities and {} systems",
            self.name,
            self.world.entity_manager().len(),
            self.world.system_manager().len(),
        );
        Ok(())
    }

    /// Runs one tick of the world, initializing the scene first if needed.
    ///
    /// Returns count of updated systems.
    ///
    /// # Errors
    ///
    /// See [`Scene::initialize`].
    ///
    pub fn update(&mut self, delta: DeltaTime) -> Result<usize> {
        self.initialize()?;
        let delta = delta.as_secs_f32() * 1000.0;
        Ok(self.world.tick(delta))
    }

    /// Tears down the world: all systems, entities, queries and component types are dropped.
    pub fn teardown(&mut self) {
        if !self.initialized {
            return;
        }
        self.handler.teardown(&mut self.world);
        self.world.clear();
        self.initialized = false;
        log::info!("scene `{}` was torn down", self.name);
    }
}
