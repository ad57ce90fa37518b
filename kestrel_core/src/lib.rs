//! API for kestrel game engine.
//!
//! Game is made of named [scenes](scene::Scene), each of them owns its own ECS world.
//! The [director](director::Director) switches between scenes and
//! the [engine](app::Engine) drives the active one with elapsed time.

pub use kestrel_ecs as ecs;

pub use app::{DeltaTime, Engine};

pub mod actor;
pub mod app;
pub mod components;
pub mod config;
pub mod director;
pub mod error;
pub mod scene;
pub mod systems;
