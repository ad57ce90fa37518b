//! Configuration utilities for game engine and your game.

use semver::Version;

/// General configuration of game engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    name: String,
    version: Version,
    enable_validation: bool,
}

/// Name of the engine crate.
pub const ENGINE_NAME: &str = env!("CARGO_CRATE_NAME", "library must be compiled by Cargo");

const ENGINE_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "library must be compiled by Cargo");

lazy_static::lazy_static! {
    /// Semver version of the engine crate.
    pub static ref ENGINE_VERSION: Version = Version::parse(ENGINE_VERSION_STR)
        .unwrap_or_else(|_| Version::new(0, 0, 0));
}

impl Config {
    /// Creates new configuration with given name, version and validation usage.
    pub const fn new(name: String, version: Version, enable_validation: bool) -> Self {
        Self {
            name,
            version,
            enable_validation,
        }
    }

    /// Returns the same configuration with validation turned on or off.
    pub fn with_validation(mut self, enable_validation: bool) -> Self {
        self.enable_validation = enable_validation;
        self
    }

    /// Name of your game.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semver version of your game.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// If worlds of all scenes check their queries before every phase.
    ///
    /// Slows down every tick, useful for debugging.
    ///
    pub fn enable_validation(&self) -> bool {
        self.enable_validation
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            "Hello World".to_string(),
            Version::new(0, 0, 0),
            cfg!(debug_assertions),
        )
    }
}
