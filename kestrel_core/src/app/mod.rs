//! Utilities for engine initialization.

use std::time::Duration;

use crate::config::{Config, ENGINE_NAME, ENGINE_VERSION};
use crate::director::Director;
use crate::error::Result;
use crate::scene::Scene;

/// Type which represents duration between two frames.
pub type DeltaTime = Duration;

/// General context of game engine.
///
/// Owns the [`Director`] with all scenes of the game
/// and drives the active scene with elapsed time.
///
pub struct Engine {
    config: Config,
    director: Director,
    elapsed: DeltaTime,
    frames: u64,
}

impl Engine {
    /// Creates new engine without scenes.
    pub fn new(config: Config) -> Self {
        log::info!(
            "{} v{} started for `{}` v{} (validation: {})",
            ENGINE_NAME,
            *ENGINE_VERSION,
            config.name(),
            config.version(),
            config.enable_validation(),
        );
        Self {
            director: Director::new(config.enable_validation()),
            config,
            elapsed: DeltaTime::ZERO,
            frames: 0,
        }
    }

    /// Configuration the engine was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Director of all scenes.
    pub fn director(&self) -> &Director {
        &self.director
    }

    /// Mutable director of all scenes.
    pub fn director_mut(&mut self) -> &mut Director {
        &mut self.director
    }

    /// Adds the scene to the director.
    ///
    /// # Errors
    ///
    /// See [`Director::add_scene`].
    ///
    pub fn add_scene(&mut self, scene: Scene) -> Result<()> {
        self.director.add_scene(scene)
    }

    /// Switches to the scene with the name.
    ///
    /// # Errors
    ///
    /// See [`Director::goto`].
    ///
    pub fn goto(&mut self, name: &str) -> Result<()> {
        self.director.goto(name)
    }

    /// Runs one frame of the active scene.
    ///
    /// Returns count of updated systems.
    ///
    /// # Errors
    ///
    /// An error is returned if there is no active scene.
    ///
    pub fn step(&mut self, delta: DeltaTime) -> Result<usize> {
        let updated = self.director.update(delta)?;
        self.elapsed += delta;
        self.frames += 1;
        Ok(updated)
    }

    /// Total time passed to [`step`](Engine::step).
    pub fn elapsed(&self) -> DeltaTime {
        self.elapsed
    }

    /// Count of frames run by [`step`](Engine::step).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Tears down the active scene.
    pub fn shutdown(&mut self) {
        self.director.leave();
        log::info!(
            "engine stopped after {} frames ({:?})",
            self.frames,
            self.elapsed,
        );
    }
}

#[cfg(test)]
mod tests {
    use semver::Version;

    use crate::ecs::World;
    use crate::error::Error;

    use super::*;

    fn empty(name: &str) -> Scene {
        Scene::new(name, |_: &mut World| -> Result<()> { Ok(()) })
    }

    #[test]
    fn test_step() {
        let config = Config::new("test".to_string(), Version::new(0, 1, 0), true);
        let mut engine = Engine::new(config);
        engine.add_scene(empty("level")).unwrap();

        assert_eq!(
            engine.step(Duration::from_millis(16)).unwrap_err(),
            Error::NoActiveScene,
        );
        engine.goto("level").unwrap();
        for _ in 0..3 {
            assert_eq!(engine.step(Duration::from_millis(16)).unwrap(), 0);
        }
        assert_eq!(engine.frames(), 3);
        assert_eq!(engine.elapsed(), Duration::from_millis(48));
        assert!(engine.director().active().unwrap().world().validation());

        engine.shutdown();
        assert!(engine.director().active().is_none());
        assert!(!engine.director().scene("level").unwrap().is_initialized());
    }
}
