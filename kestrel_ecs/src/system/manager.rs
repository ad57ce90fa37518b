//! Utilities for managing and scheduling systems.

use std::any::{type_name, TypeId};

use crate::entity::{Entity, EntityManager};
use crate::error::{EcsError, Result};
use crate::query::{QueryId, QueryManager};

use super::{ErasedSystem, System, SystemCommands, SystemContext, SystemPhase, SystemState};

/// Registered system together with its scheduling data.
struct SystemSlot {
    system: Box<dyn ErasedSystem>,
    type_id: TypeId,
    name: &'static str,
    phase: SystemPhase,
    priority: i32,
    query: QueryId,
    state: SystemState,
}

/// Manager of all systems of ECS.
///
/// Systems of one phase run in ascending order of priority,
/// systems with equal priority run in order of registration.
///
#[derive(Default)]
pub struct SystemManager {
    /// Slots sorted by priority, stable for equal priorities.
    slots: Vec<SystemSlot>,
}

impl SystemManager {
    /// Creates new system manager without systems.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Registers the system.
    ///
    /// # Errors
    ///
    /// An error is returned if system of the same type is already registered
    /// or if the system requires component type which was never registered.
    ///
    pub fn add<S>(
        &mut self,
        system: S,
        queries: &mut QueryManager,
        entities: &EntityManager,
    ) -> Result<()>
    where
        S: System,
    {
        let type_id = TypeId::of::<S>();
        let name = type_name::<S>();
        if self.position(type_id).is_some() {
            return Err(EcsError::SystemTypeCollision(name));
        }
        let query = queries.get_query(system.types(), entities)?;

        let slot = SystemSlot {
            type_id,
            name,
            phase: system.phase(),
            priority: system.priority(),
            query,
            state: SystemState::Registered,
            system: Box::new(system),
        };
        log::debug!(
            "registered system `{}` in {:?} phase with priority {}",
            slot.name,
            slot.phase,
            slot.priority,
        );
        let index = self
            .slots
            .partition_point(|other| other.priority <= slot.priority);
        self.slots.insert(index, slot);
        Ok(())
    }

    /// Removes system of type `S`.
    ///
    /// Returns removed system.
    ///
    /// # Errors
    ///
    /// An error is returned if system of type `S` is not registered.
    ///
    pub fn remove<S>(&mut self) -> Result<S>
    where
        S: System,
    {
        let name = type_name::<S>();
        let index = self
            .position(TypeId::of::<S>())
            .ok_or(EcsError::UnknownSystem(name))?;
        let mut slot = self.slots.remove(index);
        slot.state = SystemState::Removed;
        slot.system.teardown();
        log::debug!("removed system `{}`", name);

        let system = slot.system.into_any().downcast::<S>();
        system.map(|boxed| *boxed).map_err(|_| EcsError::UnknownSystem(name))
    }

    /// Removes all systems.
    ///
    /// Returns count of removed systems.
    ///
    pub fn clear(&mut self) -> usize {
        let count = self.slots.len();
        for mut slot in self.slots.drain(..) {
            slot.state = SystemState::Removed;
            slot.system.teardown();
        }
        if count > 0 {
            log::debug!("removed all {} systems", count);
        }
        count
    }

    /// Retrieves an immutable reference to system of type `S`.
    pub fn get<S>(&self) -> Option<&S>
    where
        S: System,
    {
        let index = self.position(TypeId::of::<S>())?;
        self.slots[index].system.as_any().downcast_ref()
    }

    /// Retrieves a mutable reference to system of type `S`.
    pub fn get_mut<S>(&mut self) -> Option<&mut S>
    where
        S: System,
    {
        let index = self.position(TypeId::of::<S>())?;
        self.slots[index].system.as_any_mut().downcast_mut()
    }

    /// Returns `true` if system of type `S` is registered.
    pub fn contains<S>(&self) -> bool
    where
        S: System,
    {
        self.position(TypeId::of::<S>()).is_some()
    }

    /// Current state of system of type `S`, or `None` if it is not registered.
    pub fn state<S>(&self) -> Option<SystemState>
    where
        S: System,
    {
        let index = self.position(TypeId::of::<S>())?;
        Some(self.slots[index].state)
    }

    /// Names of the systems of the phase, in order of execution.
    pub fn names(&self, phase: SystemPhase) -> Vec<&'static str> {
        self.slots
            .iter()
            .filter(|slot| slot.phase == phase)
            .map(|slot| slot.name)
            .collect()
    }

    /// Number of registered systems.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if there are no systems.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Updates all systems of the phase with entities matching their types.
    ///
    /// System removed during this pass, by another system or by itself
    /// from its `initialize` or `update`, is not updated anymore
    /// and is dropped when the pass ends.
    ///
    /// Returns count of updated systems.
    ///
    pub fn update(
        &mut self,
        phase: SystemPhase,
        delta: f32,
        entities: &mut EntityManager,
        queries: &mut QueryManager,
    ) -> usize {
        let mut commands = SystemCommands::default();
        let mut updated = 0;

        for index in 0..self.slots.len() {
            let slot = &mut self.slots[index];
            if slot.phase != phase || slot.state == SystemState::Removed {
                continue;
            }
            let matches: Vec<Entity> = queries
                .query(slot.query)
                .map(|query| query.entities().collect())
                .unwrap_or_default();

            if slot.state == SystemState::Registered {
                let mut ctx = SystemContext::new(entities, queries, &matches, &mut commands);
                slot.system.initialize(&mut ctx);
                slot.state = SystemState::Active;
                Self::apply(&mut self.slots, &mut commands);
            }

            // may have been removed during its own initialization
            let slot = &mut self.slots[index];
            if slot.state == SystemState::Removed {
                continue;
            }
            let mut ctx = SystemContext::new(entities, queries, &matches, &mut commands);
            slot.system.update(&mut ctx, delta);
            updated += 1;
            Self::apply(&mut self.slots, &mut commands);
        }

        self.purge();
        updated
    }

    /// Marks systems requested for removal as removed.
    fn apply(slots: &mut [SystemSlot], commands: &mut SystemCommands) {
        for (type_id, name) in commands.removed.drain(..) {
            match slots.iter_mut().find(|slot| slot.type_id == type_id) {
                Some(slot) => slot.state = SystemState::Removed,
                None => log::warn!("cannot remove system `{}`: it is not registered", name),
            }
        }
    }

    fn position(&self, type_id: TypeId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.type_id == type_id)
    }

    /// Drops all systems which were removed during the pass.
    fn purge(&mut self) {
        if self.slots.iter().all(|slot| slot.state != SystemState::Removed) {
            return;
        }
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.slots)
            .into_iter()
            .partition(|slot| slot.state == SystemState::Removed);
        self.slots = kept;
        for mut slot in removed {
            slot.system.teardown();
            log::debug!("removed system `{}`", slot.name);
        }
    }
}
