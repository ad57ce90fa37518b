#![cfg(test)]

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use ultraviolet::Vec2;

use crate::components::{
    register_builtins, GraphicsComponent, MotionComponent, RenderContext, TransformComponent,
};
use crate::ecs::{EntityBuilder, SystemPhase, World};

use super::*;

/// Render context which remembers every draw call.
#[derive(Default)]
struct Recorder {
    rects: Vec<(Vec2, Vec2, f32)>,
    texts: Rc<RefCell<Vec<String>>>,
}

impl RenderContext for Recorder {
    fn draw_rect(&mut self, center: Vec2, size: Vec2, _rotation: f32, opacity: f32) {
        self.rects.push((center, size, opacity));
    }

    fn draw_text(&mut self, _pos: Vec2, text: &str, _opacity: f32) {
        self.texts.borrow_mut().push(text.to_string());
    }
}

fn world() -> World {
    let mut world = World::new();
    register_builtins(&mut world).unwrap();
    world
}

#[test]
fn test_motion() {
    let mut world = world();
    world.add_system(MotionSystem::new()).unwrap();
    let entity = world
        .add_entity(
            EntityBuilder::new()
                .with(TransformComponent::default())
                .with(
                    MotionComponent::new(Vec2::new(10.0, 0.0))
                        .with_acceleration(Vec2::new(0.0, 4.0))
                        .with_angular_velocity(1.0),
                ),
        )
        .unwrap();

    world.tick(500.0);
    world.tick(500.0);

    let motion = world.get_component::<MotionComponent>(entity).unwrap();
    assert_relative_eq!(motion.vel.x, 10.0);
    assert_relative_eq!(motion.vel.y, 4.0);
    let transform = world.get_component::<TransformComponent>(entity).unwrap();
    assert_relative_eq!(transform.pos.x, 10.0);
    // velocity is updated before position: 2 * 0.5 + 4 * 0.5
    assert_relative_eq!(transform.pos.y, 3.0);
    assert_relative_eq!(transform.rotation, 1.0);
}

#[test]
fn test_motion_without_transform() {
    let mut world = world();
    world.add_system(MotionSystem::new()).unwrap();
    let entity = world
        .add_entity(EntityBuilder::new().with(MotionComponent::new(Vec2::new(1.0, 1.0))))
        .unwrap();

    assert_eq!(world.tick(1000.0), 1);
    let motion = world.get_component::<MotionComponent>(entity).unwrap();
    assert_eq!(motion.vel, Vec2::new(1.0, 1.0));
}

#[test]
fn test_graphics() {
    let mut world = world();
    world.add_system(GraphicsSystem::new(Recorder::default())).unwrap();
    let texts = world
        .system::<GraphicsSystem<Recorder>>()
        .unwrap()
        .context()
        .texts
        .clone();

    let transform =
        TransformComponent::new(Vec2::new(5.0, 5.0)).with_scale(Vec2::new(2.0, 1.0));
    world
        .add_entity(
            EntityBuilder::new()
                .with(transform)
                .with(GraphicsComponent::rect(Vec2::new(4.0, 4.0)).with_opacity(0.5)),
        )
        .unwrap();
    let hidden = world
        .add_entity(
            EntityBuilder::new()
                .with(TransformComponent::default())
                .with(GraphicsComponent::rect(Vec2::one()).hidden()),
        )
        .unwrap();
    world
        .add_entity(
            EntityBuilder::new()
                .with(TransformComponent::default())
                .with(GraphicsComponent::new().on_draw(|ctx, args| {
                    ctx.draw_text(args.transform.pos, &format!("{}", args.delta), args.opacity)
                })),
        )
        .unwrap();
    // graphics without transform is never drawn
    world
        .add_entity(EntityBuilder::new().with(GraphicsComponent::rect(Vec2::one())))
        .unwrap();

    assert_eq!(world.update(SystemPhase::Update, 16.0), 0);
    assert_eq!(world.tick(16.0), 1);

    let system = world.system::<GraphicsSystem<Recorder>>().unwrap();
    assert_eq!(system.drawn(), 2);
    assert_eq!(
        system.context().rects,
        [(Vec2::new(5.0, 5.0), Vec2::new(8.0, 4.0), 0.5)],
    );
    assert_eq!(*texts.borrow(), ["16"]);

    world
        .get_component_mut::<GraphicsComponent>(hidden)
        .unwrap()
        .visible = true;
    world.tick(16.0);
    assert_eq!(world.system::<GraphicsSystem<Recorder>>().unwrap().drawn(), 3);
}
