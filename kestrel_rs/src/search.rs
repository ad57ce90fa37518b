//! Seeking behavior: actors move straight to their targets with constant speed.

use ultraviolet::Vec2;

use kestrel_core::components::TransformComponent;
use kestrel_core::ecs::{Component, ComponentTag, System, SystemContext};

/// Target which the entity moves to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SearchComponent {
    /// Position to move to.
    pub target: Vec2,
    /// Speed in pixels per second.
    pub speed: f32,
}

impl SearchComponent {
    /// Type tag of this component.
    pub const TAG: ComponentTag = "search";

    /// Creates new search of the target with the speed in pixels per second.
    pub fn new(target: Vec2, speed: f32) -> Self {
        Self { target, speed }
    }
}

impl Component for SearchComponent {
    const TYPE: ComponentTag = Self::TAG;
}

/// Moves every searching entity towards its target.
///
/// Entity stops exactly at the target, the search component is removed then.
///
#[derive(Debug, Default)]
pub struct SearchSystem {
    arrived: usize,
}

impl SearchSystem {
    /// Creates new search system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of entities which have reached their targets.
    pub fn arrived(&self) -> usize {
        self.arrived
    }
}

impl System for SearchSystem {
    fn types(&self) -> &[ComponentTag] {
        &[TransformComponent::TAG, SearchComponent::TAG]
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, delta: f32) {
        for entity in ctx.entities().to_vec() {
            let search = match ctx.get::<SearchComponent>(entity) {
                Some(search) => *search,
                None => continue,
            };
            let transform = match ctx.get_mut::<TransformComponent>(entity) {
                Some(transform) => transform,
                None => continue,
            };

            let offset = search.target - transform.pos;
            let distance = offset.mag();
            let step = search.speed * delta / 1000.0;
            if distance > step {
                transform.translate(offset / distance * step);
                continue;
            }
            transform.pos = search.target;
            if ctx.remove_component::<SearchComponent>(entity).is_ok() {
                self.arrived += 1;
                log::debug!("entity {:?} arrived at {:?}", entity, search.target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use kestrel_core::components::register_builtins;
    use kestrel_core::ecs::{EntityBuilder, World};

    use super::*;

    fn world() -> World {
        let mut world = World::new();
        register_builtins(&mut world).unwrap();
        world.register_component::<SearchComponent>().unwrap();
        world.add_system(SearchSystem::new()).unwrap();
        world
    }

    #[test]
    fn test_moves_along_direction() {
        let mut world = world();
        let entity = world
            .add_entity(
                EntityBuilder::new()
                    .with(TransformComponent::default())
                    .with(SearchComponent::new(Vec2::new(100.0, 100.0), 10.0)),
            )
            .unwrap();

        world.tick(1000.0);

        let pos = world.get_component::<TransformComponent>(entity).unwrap().pos;
        assert_relative_eq!(pos.mag(), 10.0, epsilon = 1e-4);
        assert_relative_eq!(pos.x, 10.0 / 2.0_f32.sqrt(), epsilon = 1e-4);
        assert_relative_eq!(pos.y, pos.x);
    }

    #[test]
    fn test_matches_after_search_added() {
        let mut world = world();
        let entity = world
            .add_entity(EntityBuilder::new().with(TransformComponent::default()))
            .unwrap();
        let query = world.query(&["transform", "search"]).unwrap();

        world.tick(1000.0);
        assert!(world.query_entities(query).is_empty());
        assert_eq!(
            world.get_component::<TransformComponent>(entity).unwrap().pos,
            Vec2::zero(),
        );

        world
            .add_component(entity, SearchComponent::new(Vec2::new(0.0, 50.0), 10.0))
            .unwrap();
        assert_eq!(world.query_entities(query), [entity]);
        world.tick(1000.0);
        assert_relative_eq!(
            world.get_component::<TransformComponent>(entity).unwrap().pos.y,
            10.0,
        );
    }

    #[test]
    fn test_arrival() {
        let mut world = world();
        let target = Vec2::new(3.0, 4.0);
        let entity = world
            .add_entity(
                EntityBuilder::new()
                    .with(TransformComponent::default())
                    .with(SearchComponent::new(target, 4.0)),
            )
            .unwrap();

        world.tick(1000.0);
        assert!(world.get_component::<SearchComponent>(entity).is_some());
        world.tick(1000.0);

        assert_eq!(
            world.get_component::<TransformComponent>(entity).unwrap().pos,
            target,
        );
        assert!(world.get_component::<SearchComponent>(entity).is_none());
        assert_eq!(world.system::<SearchSystem>().unwrap().arrived(), 1);
    }
}
