//! Utilities for switching between scenes of the game.

use std::collections::HashMap;

use crate::app::DeltaTime;
use crate::error::{Error, Result};
use crate::scene::Scene;

/// Owner of all scenes of the game, at most one of them is active.
///
/// Leaving the active scene tears its world down completely.
///
#[derive(Default)]
pub struct Director {
    scenes: HashMap<String, Scene>,
    active: Option<String>,
    validation: bool,
}

impl Director {
    /// Creates new director without scenes.
    ///
    /// If `validation` is set, worlds of all scenes verify their queries before every phase.
    ///
    pub fn new(validation: bool) -> Self {
        Self {
            scenes: HashMap::new(),
            active: None,
            validation,
        }
    }

    /// Adds the scene, it stays inactive until [`goto`](Director::goto) is called.
    ///
    /// # Errors
    ///
    /// An error is returned if scene with the same name was added before.
    ///
    pub fn add_scene(&mut self, mut scene: Scene) -> Result<()> {
        if self.scenes.contains_key(scene.name()) {
            return Err(Error::SceneAlreadyExists(scene.name().to_string()));
        }
        scene.set_validation(self.validation);
        log::debug!("added scene `{}`", scene.name());
        self.scenes.insert(scene.name().to_string(), scene);
        Ok(())
    }

    /// Removes the scene, tearing it down if it is active.
    ///
    /// # Errors
    ///
    /// An error is returned if there is no scene with the name.
    ///
    pub fn remove_scene(&mut self, name: &str) -> Result<Scene> {
        let mut scene = self
            .scenes
            .remove(name)
            .ok_or_else(|| Error::SceneNotFound(name.to_string()))?;
        if self.active.as_deref() == Some(name) {
            self.active = None;
            scene.teardown();
        }
        Ok(scene)
    }

    /// Makes the scene with the name active.
    ///
    /// Previously active scene is torn down, even if it is the same scene:
    /// going to the active scene restarts it.
    ///
    /// # Errors
    ///
    /// An error is returned if there is no scene with the name
    /// or if the scene failed to initialize. In the latter case no scene is active.
    ///
    pub fn goto(&mut self, name: &str) -> Result<()> {
        if !self.scenes.contains_key(name) {
            return Err(Error::SceneNotFound(name.to_string()));
        }
        if let Some(leaving) = self.active.take() {
            if let Some(scene) = self.scenes.get_mut(&leaving) {
                scene.teardown();
            }
        }

        let scene = self
            .scenes
            .get_mut(name)
            .ok_or_else(|| Error::SceneNotFound(name.to_string()))?;
        scene.initialize()?;
        self.active = Some(name.to_string());
        log::info!("entered scene `{}`", name);
        Ok(())
    }

    /// Runs one tick of the active scene.
    ///
    /// Returns count of updated systems.
    ///
    /// # Errors
    ///
    /// An error is returned if there is no active scene.
    ///
    pub fn update(&mut self, delta: DeltaTime) -> Result<usize> {
        self.active_mut().ok_or(Error::NoActiveScene)?.update(delta)
    }

    /// Tears down the active scene, after this no scene is active.
    pub fn leave(&mut self) {
        if let Some(leaving) = self.active.take() {
            if let Some(scene) = self.scenes.get_mut(&leaving) {
                scene.teardown();
            }
        }
    }

    /// Currently active scene, if any.
    pub fn active(&self) -> Option<&Scene> {
        self.scenes.get(self.active.as_deref()?)
    }

    /// Mutable currently active scene, if any.
    pub fn active_mut(&mut self) -> Option<&mut Scene> {
        self.scenes.get_mut(self.active.as_deref()?)
    }

    /// Retrieves the scene by its name.
    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    /// Retrieves the mutable scene by its name.
    pub fn scene_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.scenes.get_mut(name)
    }

    /// Names of all scenes, sorted.
    pub fn scene_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.scenes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Returns `true` if there are no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}
