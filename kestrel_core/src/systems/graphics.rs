use crate::components::{GraphicsComponent, RenderContext, TransformComponent};
use crate::ecs::{ComponentTag, System, SystemContext, SystemPhase};

/// Draws all visible entities with the render context, once per draw phase.
pub struct GraphicsSystem<C> {
    context: C,
    drawn: usize,
}

impl<C> GraphicsSystem<C>
where
    C: RenderContext + 'static,
{
    /// Creates new graphics system which draws with the context.
    pub fn new(context: C) -> Self {
        Self { context, drawn: 0 }
    }

    /// Render context of this system.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutable render context of this system.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Count of entities drawn during the last draw phase.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Destroys the system, returning its render context.
    pub fn into_context(self) -> C {
        self.context
    }
}

impl<C> System for GraphicsSystem<C>
where
    C: RenderContext + 'static,
{
    fn types(&self) -> &[ComponentTag] {
        &[TransformComponent::TAG, GraphicsComponent::TAG]
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::Draw
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, delta: f32) {
        self.drawn = 0;
        for &entity in ctx.entities().to_vec().iter() {
            let transform = match ctx.get::<TransformComponent>(entity) {
                Some(transform) => *transform,
                None => continue,
            };
            let graphics = match ctx.get_mut::<GraphicsComponent>(entity) {
                Some(graphics) if graphics.visible => graphics,
                _ => continue,
            };
            if graphics.draw(&mut self.context, &transform, delta) {
                self.drawn += 1;
            }
        }
        log::trace!("drawn {} entities", self.drawn);
    }
}
