use std::fmt;

use ultraviolet::Vec2;

use crate::ecs::{Component, ComponentTag};

use super::TransformComponent;

/// Drawing backend provided by the game.
///
/// The engine never draws anything by itself: it only calls
/// draw callbacks of visible entities with this context.
///
pub trait RenderContext {
    /// Draws rectangle centered at the position.
    fn draw_rect(&mut self, center: Vec2, size: Vec2, rotation: f32, opacity: f32);

    /// Draws text starting at the position.
    fn draw_text(&mut self, pos: Vec2, text: &str, opacity: f32);
}

/// Data passed to the draw callback of an entity.
#[derive(Debug, Copy, Clone)]
pub struct DrawArgs<'a> {
    /// Transform of the drawn entity.
    pub transform: &'a TransformComponent,
    /// Opacity of the drawn entity.
    pub opacity: f32,
    /// Time elapsed since the previous tick, in milliseconds.
    pub delta: f32,
}

/// Callback which draws an entity.
pub type DrawCallback = Box<dyn FnMut(&mut dyn RenderContext, &DrawArgs<'_>)>;

/// Visual appearance of the entity.
///
/// Drawn by [`GraphicsSystem`](crate::systems::GraphicsSystem) every draw phase
/// while the entity is visible.
///
pub struct GraphicsComponent {
    /// Invisible entities are skipped by the draw phase.
    pub visible: bool,
    /// Opacity in range `0.0..=1.0`.
    pub opacity: f32,
    on_draw: Option<DrawCallback>,
}

impl GraphicsComponent {
    /// Type tag of this component.
    pub const TAG: ComponentTag = "graphics";

    /// Creates visible and opaque graphics without draw callback.
    pub fn new() -> Self {
        Self {
            visible: true,
            opacity: 1.0,
            on_draw: None,
        }
    }

    /// Sets the callback which draws the entity.
    pub fn on_draw<F>(mut self, on_draw: F) -> Self
    where
        F: FnMut(&mut dyn RenderContext, &DrawArgs<'_>) + 'static,
    {
        self.on_draw = Some(Box::new(on_draw));
        self
    }

    /// Draws the entity as a rectangle of the size, scaled by its transform.
    pub fn rect(size: Vec2) -> Self {
        Self::new().on_draw(move |ctx, args| {
            let transform = args.transform;
            let size = size * transform.scale;
            ctx.draw_rect(transform.pos, size, transform.rotation, args.opacity);
        })
    }

    /// Sets the opacity, clamped into `0.0..=1.0`.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Makes the entity invisible.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Returns `true` if the draw callback was set.
    pub fn has_callback(&self) -> bool {
        self.on_draw.is_some()
    }

    /// Calls the draw callback, if any.
    ///
    /// Returns `true` if the callback was called.
    ///
    pub fn draw(
        &mut self,
        ctx: &mut dyn RenderContext,
        transform: &TransformComponent,
        delta: f32,
    ) -> bool {
        let args = DrawArgs {
            transform,
            opacity: self.opacity,
            delta,
        };
        match self.on_draw.as_mut() {
            Some(on_draw) => {
                on_draw(ctx, &args);
                true
            }
            None => false,
        }
    }
}

impl Default for GraphicsComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GraphicsComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphicsComponent")
            .field("visible", &self.visible)
            .field("opacity", &self.opacity)
            .field("on_draw", &self.on_draw.as_ref().map(|_| ".."))
            .finish()
    }
}

impl Component for GraphicsComponent {
    const TYPE: ComponentTag = Self::TAG;
}
