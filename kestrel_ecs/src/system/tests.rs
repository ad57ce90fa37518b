#![cfg(test)]

use std::cell::RefCell;
use std::rc::Rc;

use crate::component::{Component, ComponentTag};
use crate::entity::{EntityBuilder, EntityManager};
use crate::error::EcsError;
use crate::query::QueryManager;

use super::*;

type Log = Rc<RefCell<Vec<String>>>;

#[derive(Debug, PartialEq)]
struct Counter(u32);

impl Component for Counter {
    const TYPE: ComponentTag = "counter";
}

/// Declares system type which records its calls into the log.
macro_rules! recording_system {
    ($name:ident, $priority:expr, $phase:expr) => {
        struct $name(Log);

        impl System for $name {
            fn types(&self) -> &[ComponentTag] {
                &[]
            }

            fn phase(&self) -> SystemPhase {
                $phase
            }

            fn priority(&self) -> i32 {
                $priority
            }

            fn initialize(&mut self, _ctx: &mut SystemContext<'_>) {
                self.0.borrow_mut().push(format!("init {}", stringify!($name)));
            }

            fn update(&mut self, _ctx: &mut SystemContext<'_>, _delta: f32) {
                self.0.borrow_mut().push(stringify!($name).to_string());
            }

            fn teardown(&mut self) {
                self.0.borrow_mut().push(format!("teardown {}", stringify!($name)));
            }
        }
    };
}

recording_system!(A, 1, SystemPhase::Update);
recording_system!(B, 1, SystemPhase::Update);
recording_system!(C, 0, SystemPhase::Update);
recording_system!(Painter, -10, SystemPhase::Draw);

/// Increments counters of all matching entities.
struct CounterSystem;

impl System for CounterSystem {
    fn types(&self) -> &[ComponentTag] {
        &["counter"]
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta: f32) {
        for &entity in ctx.entities().to_vec().iter() {
            if let Some(counter) = ctx.get_mut::<Counter>(entity) {
                counter.0 += 1;
            }
        }
    }
}

/// Removes system `B` when updated.
struct Remover;

impl System for Remover {
    fn types(&self) -> &[ComponentTag] {
        &[]
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta: f32) {
        ctx.remove_system::<B>();
    }
}

/// Removes itself right from its initialization.
struct EarlyQuitter(Log);

impl System for EarlyQuitter {
    fn types(&self) -> &[ComponentTag] {
        &[]
    }

    fn initialize(&mut self, ctx: &mut SystemContext<'_>) {
        self.0.borrow_mut().push("init EarlyQuitter".to_string());
        ctx.remove_system::<Self>();
    }

    fn update(&mut self, _ctx: &mut SystemContext<'_>, _delta: f32) {
        self.0.borrow_mut().push("EarlyQuitter".to_string());
    }

    fn teardown(&mut self) {
        self.0.borrow_mut().push("teardown EarlyQuitter".to_string());
    }
}

/// Runs exactly once, removing itself from its first update.
struct OneShot(Log);

impl System for OneShot {
    fn types(&self) -> &[ComponentTag] {
        &[]
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta: f32) {
        self.0.borrow_mut().push("OneShot".to_string());
        ctx.remove_system::<Self>();
    }

    fn teardown(&mut self) {
        self.0.borrow_mut().push("teardown OneShot".to_string());
    }
}

struct Setup {
    entities: EntityManager,
    queries: QueryManager,
    systems: SystemManager,
    log: Log,
}

impl Setup {
    fn new() -> Self {
        let mut entities = EntityManager::new();
        entities.registry_mut().register::<Counter>().unwrap();
        Self {
            entities,
            queries: QueryManager::new(),
            systems: SystemManager::new(),
            log: Log::default(),
        }
    }

    fn add<S: System>(&mut self, system: S) -> crate::Result<()> {
        self.systems.add(system, &mut self.queries, &self.entities)
    }

    fn update(&mut self, phase: SystemPhase) -> usize {
        self.systems
            .update(phase, 16.0, &mut self.entities, &mut self.queries)
    }

    fn take_log(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}

#[test]
fn test_priority_order() {
    let mut setup = Setup::new();
    setup.add(A(setup.log.clone())).unwrap();
    setup.add(B(setup.log.clone())).unwrap();
    setup.add(C(setup.log.clone())).unwrap();

    assert_eq!(setup.update(SystemPhase::Update), 3);
    assert_eq!(
        setup.take_log(),
        ["init C", "C", "init A", "A", "init B", "B"],
    );
    assert_eq!(setup.update(SystemPhase::Update), 3);
    assert_eq!(setup.take_log(), ["C", "A", "B"]);

    let names = setup.systems.names(SystemPhase::Update);
    assert!(names[0].ends_with("C") && names[1].ends_with("A") && names[2].ends_with("B"));
}

#[test]
fn test_phases() {
    let mut setup = Setup::new();
    setup.add(Painter(setup.log.clone())).unwrap();
    setup.add(A(setup.log.clone())).unwrap();

    assert_eq!(setup.update(SystemPhase::Update), 1);
    assert_eq!(setup.take_log(), ["init A", "A"]);
    assert_eq!(setup.update(SystemPhase::Draw), 1);
    assert_eq!(setup.take_log(), ["init Painter", "Painter"]);
    assert_eq!(setup.systems.names(SystemPhase::Draw).len(), 1);
}

#[test]
fn test_state_transitions() {
    let mut setup = Setup::new();
    assert_eq!(setup.systems.state::<A>(), None);

    setup.add(A(setup.log.clone())).unwrap();
    assert_eq!(setup.systems.state::<A>(), Some(SystemState::Registered));

    setup.update(SystemPhase::Update);
    assert_eq!(setup.systems.state::<A>(), Some(SystemState::Active));
    setup.take_log();

    let system = setup.systems.remove::<A>().unwrap();
    assert_eq!(setup.take_log(), ["teardown A"]);
    assert!(Rc::ptr_eq(&system.0, &setup.log));
    assert_eq!(setup.systems.state::<A>(), None);

    // removed system comes back only as a new registration
    setup.add(system).unwrap();
    assert_eq!(setup.systems.state::<A>(), Some(SystemState::Registered));
}

#[test]
fn test_type_collision() {
    let mut setup = Setup::new();
    setup.add(A(setup.log.clone())).unwrap();

    let error = setup.add(A(setup.log.clone())).unwrap_err();
    assert!(matches!(error, EcsError::SystemTypeCollision(_)));
    assert_eq!(setup.systems.len(), 1);
}

#[test]
fn test_remove_unknown() {
    let mut setup = Setup::new();
    let error = setup.systems.remove::<A>().err().unwrap();
    assert!(matches!(error, EcsError::UnknownSystem(_)));
}

#[test]
fn test_unknown_component_tag() {
    struct Lost;

    impl System for Lost {
        fn types(&self) -> &[ComponentTag] {
            &["lost"]
        }

        fn update(&mut self, _ctx: &mut SystemContext<'_>, _delta: f32) {}
    }

    let mut setup = Setup::new();
    let error = setup.add(Lost).unwrap_err();
    assert_eq!(error, EcsError::UnknownComponentTag("lost".to_string()));
    assert!(setup.systems.is_empty());
}

#[test]
fn test_clear() {
    let mut setup = Setup::new();
    setup.add(A(setup.log.clone())).unwrap();
    setup.add(Painter(setup.log.clone())).unwrap();

    assert_eq!(setup.systems.clear(), 2);
    assert_eq!(setup.take_log(), ["teardown Painter", "teardown A"]);
    assert_eq!(setup.update(SystemPhase::Update), 0);
    assert_eq!(setup.update(SystemPhase::Draw), 0);
    assert!(setup.take_log().is_empty());
}

#[test]
fn test_remove_during_pass() {
    let mut setup = Setup::new();
    setup.add(Remover).unwrap();
    setup.add(B(setup.log.clone())).unwrap();
    setup.add(C(setup.log.clone())).unwrap();

    // remover and C run first, B is skipped and dropped at the end
    assert_eq!(setup.update(SystemPhase::Update), 2);
    assert_eq!(setup.take_log(), ["init C", "C", "teardown B"]);
    assert!(!setup.systems.contains::<B>());
    assert_eq!(setup.systems.len(), 2);

    assert_eq!(setup.update(SystemPhase::Update), 2);
    assert_eq!(setup.take_log(), ["C"]);
}

#[test]
fn test_update_components() {
    let mut setup = Setup::new();
    let entity = setup
        .entities
        .insert(EntityBuilder::new().with(Counter(0)), &mut setup.queries)
        .unwrap();
    setup.entities.spawn(&mut setup.queries);
    setup.add(CounterSystem).unwrap();

    setup.update(SystemPhase::Update);
    setup.update(SystemPhase::Update);
    assert_eq!(setup.entities.component::<Counter>(entity), Some(&Counter(2)));
    assert!(setup.systems.get::<CounterSystem>().is_some());
}

#[test]
fn test_structural_changes_during_update() {
    /// Despawns every matching entity and spawns a replacement.
    struct Respawner {
        seen: Vec<bool>,
    }

    impl System for Respawner {
        fn types(&self) -> &[ComponentTag] {
            &["counter"]
        }

        fn update(&mut self, ctx: &mut SystemContext<'_>, _delta: f32) {
            let matches = ctx.entities().to_vec();
            for &entity in &matches {
                ctx.despawn(entity).unwrap();
            }
            for &entity in &matches {
                self.seen.push(ctx.get::<Counter>(entity).is_some());
            }
            ctx.spawn(EntityBuilder::new().with(Counter(100))).unwrap();
            let fresh = ctx.query(&["counter"]).unwrap();
            assert_eq!(fresh.len(), 1);
        }
    }

    let mut setup = Setup::new();
    for i in 0..3 {
        setup
            .entities
            .insert(EntityBuilder::new().with(Counter(i)), &mut setup.queries)
            .unwrap();
    }
    setup.add(Respawner { seen: Vec::new() }).unwrap();
    setup.update(SystemPhase::Update);

    let system = setup.systems.get_mut::<Respawner>().unwrap();
    assert_eq!(system.seen, [false, false, false]);
    assert_eq!(setup.entities.len(), 1);
}

#[test]
fn test_remove_itself_in_initialize() {
    let mut setup = Setup::new();
    setup.add(EarlyQuitter(setup.log.clone())).unwrap();
    setup.add(A(setup.log.clone())).unwrap();

    assert_eq!(setup.update(SystemPhase::Update), 1);
    assert_eq!(
        setup.take_log(),
        ["init EarlyQuitter", "init A", "A", "teardown EarlyQuitter"],
    );
    assert!(!setup.systems.contains::<EarlyQuitter>());

    assert_eq!(setup.update(SystemPhase::Update), 1);
    assert_eq!(setup.take_log(), ["A"]);
}

#[test]
fn test_remove_itself_in_update() {
    let mut setup = Setup::new();
    setup.add(OneShot(setup.log.clone())).unwrap();
    setup.add(B(setup.log.clone())).unwrap();

    assert_eq!(setup.update(SystemPhase::Update), 2);
    assert_eq!(
        setup.take_log(),
        ["OneShot", "init B", "B", "teardown OneShot"],
    );
    assert_eq!(setup.systems.state::<OneShot>(), None);

    assert_eq!(setup.update(SystemPhase::Update), 1);
    assert_eq!(setup.take_log(), ["B"]);
}
