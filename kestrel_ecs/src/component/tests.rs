#![cfg(test)]

use std::any::TypeId;

use crate::error::EcsError;

use super::*;

struct Position(f32, f32);

impl Component for Position {
    const TYPE: ComponentTag = "position";
}

struct Velocity(f32, f32);

impl Component for Velocity {
    const TYPE: ComponentTag = "velocity";
}

/// Unrelated type which reuses the tag of `Position`.
struct Impostor;

impl Component for Impostor {
    const TYPE: ComponentTag = "position";
}

#[test]
fn test_erased_type_tag() {
    let component: Box<dyn ErasedComponent> = Box::new(Velocity(1.0, 2.0));
    assert_eq!(component.type_tag(), "velocity");
    assert_eq!(component.component_type_id(), TypeId::of::<Velocity>());

    let velocity = downcast::<Velocity>(component).unwrap();
    assert_eq!((velocity.0, velocity.1), (1.0, 2.0));
}

#[test]
fn test_downcast_wrong_type() {
    let component: Box<dyn ErasedComponent> = Box::new(Position(0.0, 0.0));
    assert!(downcast::<Velocity>(component).is_none());
}

#[test]
fn test_register_twice() {
    let mut registry = ComponentRegistry::new();
    registry.register::<Position>().unwrap();
    registry.register::<Position>().unwrap();
    registry.register::<Velocity>().unwrap();

    assert_eq!(registry.len(), 2);
    assert!(registry.contains("position"));
    assert_eq!(registry.get("velocity"), Some(&ComponentInfo::of::<Velocity>()));
}

#[test]
fn test_register_collision() {
    let mut registry = ComponentRegistry::new();
    registry.register::<Position>().unwrap();

    let error = registry.register::<Impostor>().unwrap_err();
    assert!(matches!(
        error,
        EcsError::ComponentTypeCollision { tag: "position", .. }
    ));
    assert_eq!(registry.get("position").unwrap().type_id, TypeId::of::<Position>());
}

#[test]
fn test_info_of_erased() {
    let component = Position(3.0, 4.0);
    let info = ComponentInfo::of_erased(&component);
    assert_eq!(info, ComponentInfo::of::<Position>());
    assert!(info.type_name.ends_with("Position"));
}
