use ultraviolet::Vec2;

use crate::ecs::{Component, ComponentTag};

/// Position, rotation and scale of the entity in the scene.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransformComponent {
    /// Position in pixels.
    pub pos: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Scale along both axes, unit by default.
    pub scale: Vec2,
}

impl TransformComponent {
    /// Type tag of this component.
    pub const TAG: ComponentTag = "transform";

    /// Creates new transform at the position, without rotation and with unit scale.
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            rotation: 0.0,
            scale: Vec2::one(),
        }
    }

    /// Sets rotation in radians.
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets scale along both axes.
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Moves the entity by the offset.
    pub fn translate(&mut self, offset: Vec2) {
        self.pos += offset;
    }

    /// Unit vector pointing along the rotation.
    pub fn forward(&self) -> Vec2 {
        Vec2::new(self.rotation.cos(), self.rotation.sin())
    }
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self::new(Vec2::zero())
    }
}

impl Component for TransformComponent {
    const TYPE: ComponentTag = Self::TAG;
}
