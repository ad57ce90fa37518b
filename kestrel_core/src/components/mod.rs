//! Built-in components of game engine.

use crate::ecs::{Result, World};

pub use graphics::*;
pub use motion::*;
pub use transform::*;

mod graphics;
mod motion;
mod transform;

/// Registers types of all built-in components in the world,
/// so systems and queries may require them before any entity owns them.
///
/// # Errors
///
/// An error is returned if some tag of built-in component is already bound to another type.
///
pub fn register_builtins(world: &mut World) -> Result<()> {
    world.register_component::<TransformComponent>()?;
    world.register_component::<MotionComponent>()?;
    world.register_component::<GraphicsComponent>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::ecs::{Component, EcsError};

    use super::*;

    #[test]
    fn test_register_builtins() {
        let mut world = World::new();
        register_builtins(&mut world).unwrap();
        register_builtins(&mut world).unwrap();

        let registry = world.entity_manager().registry();
        assert_eq!(registry.len(), 3);
        for tag in ["transform", "motion", "graphics"] {
            assert!(registry.contains(tag));
        }
    }

    #[test]
    fn test_register_builtins_collision() {
        struct Position;

        impl Component for Position {
            const TYPE: &'static str = "transform";
        }

        let mut world = World::new();
        world.register_component::<Position>().unwrap();
        let error = register_builtins(&mut world).unwrap_err();
        assert!(matches!(error, EcsError::ComponentTypeCollision { .. }));
    }
}
