//! Built-in systems of game engine.

pub use graphics::*;
pub use motion::*;

mod graphics;
mod motion;
mod tests;
