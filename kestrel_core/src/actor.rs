//! Factory of *actors*: entities which live in the scene and may move and be drawn.

use ultraviolet::Vec2;

use crate::components::{
    DrawArgs, GraphicsComponent, MotionComponent, RenderContext, TransformComponent,
};
use crate::ecs::{Component, Entity, EntityBuilder, Result, World};

/// Builder of an actor.
///
/// Every actor has a [`TransformComponent`]. Motion and graphics are attached
/// only if they were configured, other components can be added with [`with`](ActorBuilder::with).
///
/// ```
/// use kestrel_core::actor::ActorBuilder;
/// use kestrel_core::ecs::World;
/// use ultraviolet::Vec2;
///
/// let mut world = World::new();
/// let actor = ActorBuilder::new(Vec2::new(10.0, 20.0))
///     .named("ship")
///     .velocity(Vec2::new(5.0, 0.0))
///     .spawn(&mut world)
///     .unwrap();
/// assert!(world.entity(actor).unwrap().has("motion"));
/// ```
///
pub struct ActorBuilder {
    builder: EntityBuilder,
    transform: TransformComponent,
    motion: Option<MotionComponent>,
    graphics: Option<GraphicsComponent>,
}

impl ActorBuilder {
    /// Creates new actor at the position.
    pub fn new(pos: Vec2) -> Self {
        Self {
            builder: EntityBuilder::new(),
            transform: TransformComponent::new(pos),
            motion: None,
            graphics: None,
        }
    }

    /// Sets the name of the actor.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.builder = self.builder.named(name);
        self
    }

    /// Sets initial rotation in radians.
    pub fn rotation(mut self, rotation: f32) -> Self {
        self.transform.rotation = rotation;
        self
    }

    /// Sets initial scale.
    pub fn scale(mut self, scale: Vec2) -> Self {
        self.transform.scale = scale;
        self
    }

    /// Sets initial velocity in pixels per second, attaching motion.
    pub fn velocity(mut self, vel: Vec2) -> Self {
        self.motion_mut().vel = vel;
        self
    }

    /// Sets acceleration in pixels per second squared, attaching motion.
    pub fn acceleration(mut self, acc: Vec2) -> Self {
        self.motion_mut().acc = acc;
        self
    }

    /// Sets angular velocity in radians per second, attaching motion.
    pub fn angular_velocity(mut self, angular_vel: f32) -> Self {
        self.motion_mut().angular_vel = angular_vel;
        self
    }

    /// Sets visual appearance of the actor.
    pub fn graphics(mut self, graphics: GraphicsComponent) -> Self {
        self.graphics = Some(graphics);
        self
    }

    /// Sets the callback which draws the actor.
    pub fn on_draw<F>(self, on_draw: F) -> Self
    where
        F: FnMut(&mut dyn RenderContext, &DrawArgs<'_>) + 'static,
    {
        self.graphics(GraphicsComponent::new().on_draw(on_draw))
    }

    /// Adds any other component to the actor.
    pub fn with<T>(mut self, component: T) -> Self
    where
        T: Component,
    {
        self.builder = self.builder.with(component);
        self
    }

    /// Converts the actor into the entity builder.
    pub fn build(self) -> EntityBuilder {
        let mut builder = self.builder.with(self.transform);
        if let Some(motion) = self.motion {
            builder = builder.with(motion);
        }
        if let Some(graphics) = self.graphics {
            builder = builder.with(graphics);
        }
        builder
    }

    /// Adds the actor to the world.
    ///
    /// # Errors
    ///
    /// See [`World::add_entity`].
    ///
    pub fn spawn(self, world: &mut World) -> Result<Entity> {
        world.add_entity(self.build())
    }

    fn motion_mut(&mut self) -> &mut MotionComponent {
        self.motion.get_or_insert_with(MotionComponent::default)
    }
}
