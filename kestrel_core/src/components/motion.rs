use ultraviolet::Vec2;

use crate::ecs::{Component, ComponentTag};

/// Linear and angular motion of the entity.
///
/// Integrated by [`MotionSystem`](crate::systems::MotionSystem) every update phase.
///
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MotionComponent {
    /// Velocity in pixels per second.
    pub vel: Vec2,
    /// Acceleration in pixels per second squared.
    pub acc: Vec2,
    /// Angular velocity in radians per second.
    pub angular_vel: f32,
}

impl MotionComponent {
    /// Type tag of this component.
    pub const TAG: ComponentTag = "motion";

    /// Creates new motion with the velocity, without acceleration and rotation.
    pub fn new(vel: Vec2) -> Self {
        Self {
            vel,
            acc: Vec2::zero(),
            angular_vel: 0.0,
        }
    }

    /// Sets acceleration in pixels per second squared.
    pub fn with_acceleration(mut self, acc: Vec2) -> Self {
        self.acc = acc;
        self
    }

    /// Sets angular velocity in radians per second.
    pub fn with_angular_velocity(mut self, angular_vel: f32) -> Self {
        self.angular_vel = angular_vel;
        self
    }

    /// Current speed in pixels per second.
    pub fn speed(&self) -> f32 {
        self.vel.mag()
    }
}

impl Default for MotionComponent {
    fn default() -> Self {
        Self::new(Vec2::zero())
    }
}

impl Component for MotionComponent {
    const TYPE: ComponentTag = Self::TAG;
}
