use crate::components::{MotionComponent, TransformComponent};
use crate::ecs::{ComponentTag, System, SystemContext};

/// Integrates motion of all moving entities: acceleration into velocity,
/// velocity into position and angular velocity into rotation.
#[derive(Debug, Default)]
pub struct MotionSystem;

impl MotionSystem {
    /// Creates new motion system.
    pub fn new() -> Self {
        Self
    }
}

impl System for MotionSystem {
    fn types(&self) -> &[ComponentTag] {
        &[TransformComponent::TAG, MotionComponent::TAG]
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, delta: f32) {
        let seconds = delta / 1000.0;
        for entity in ctx.entities().to_vec() {
            let motion = match ctx.get_mut::<MotionComponent>(entity) {
                Some(motion) => {
                    motion.vel += motion.acc * seconds;
                    *motion
                }
                None => continue,
            };
            if let Some(transform) = ctx.get_mut::<TransformComponent>(entity) {
                transform.translate(motion.vel * seconds);
                transform.rotation += motion.angular_vel * seconds;
            }
        }
    }
}
