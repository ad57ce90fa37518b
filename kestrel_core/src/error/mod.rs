//! Utilities for game engine error handling.

use thiserror::Error;

use crate::ecs::EcsError;

/// Result of any operation which can return an error.
pub type Result<T> = std::result::Result<T, Error>;

/// General error type of game engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("ECS error: {0}")]
    Ecs(#[from] EcsError),

    #[error("scene `{0}` was not found")]
    SceneNotFound(String),

    #[error("scene `{0}` already exists")]
    SceneAlreadyExists(String),

    #[error("there is no active scene")]
    NoActiveScene,
}
