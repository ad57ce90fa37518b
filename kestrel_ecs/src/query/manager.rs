//! Utilities for managing live queries.

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::component::ComponentTag;
use crate::entity::{Entity, EntityEntry, EntityManager, EntityObserver};
use crate::error::{EcsError, Result};

use super::{canonical_tags, Query, QueryId};

/// Manager of all live queries of ECS.
///
/// Observes structural changes of entities and updates only queries
/// which require the changed component type.
///
#[derive(Debug, Default)]
pub struct QueryManager {
    queries: SlotMap<QueryId, Query>,
    /// Query for each canonical set of required types.
    signatures: HashMap<Box<[ComponentTag]>, QueryId>,
    /// Queries which require the component type.
    by_tag: HashMap<ComponentTag, Vec<QueryId>>,
    /// Queries without required types, they match every entity.
    match_all: Vec<QueryId>,
}

impl QueryManager {
    /// Creates new query manager without queries.
    pub fn new() -> Self {
        Self {
            queries: SlotMap::with_key(),
            signatures: HashMap::new(),
            by_tag: HashMap::new(),
            match_all: Vec::new(),
        }
    }

    /// Returns query of entities which own components of all the types.
    ///
    /// The same query is shared by all callers asking for the same set of types,
    /// regardless of order and duplicates. New query is filled by scanning
    /// all entities once, then it is updated incrementally.
    ///
    /// # Errors
    ///
    /// An error is returned if some type was never registered.
    ///
    pub fn get_query(&mut self, tags: &[ComponentTag], entities: &EntityManager) -> Result<QueryId> {
        let registry = entities.registry();
        if let Some(tag) = tags.iter().find(|tag| !registry.contains(tag)) {
            return Err(EcsError::UnknownComponentTag(tag.to_string()));
        }
        let tags = canonical_tags(tags);
        if let Some(&id) = self.signatures.get(&tags) {
            return Ok(id);
        }

        let mut query = Query::new(tags.clone());
        for (entity, entry) in entities.iter() {
            if query.matches(entry) {
                query.insert(entity, entry.order());
            }
        }
        log::debug!("created query over {:?} with {} entities", tags, query.len());

        let id = self.queries.insert(query);
        if tags.is_empty() {
            self.match_all.push(id);
        }
        for &tag in tags.iter() {
            self.by_tag.entry(tag).or_default().push(id);
        }
        self.signatures.insert(tags, id);
        Ok(id)
    }

    /// Retrieves the query by its identifier.
    pub fn query(&self, id: QueryId) -> Option<&Query> {
        self.queries.get(id)
    }

    /// Returns iterator over all queries.
    pub fn iter(&self) -> impl Iterator<Item = (QueryId, &Query)> {
        self.queries.iter()
    }

    /// Number of live queries.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Returns `true` if there are no queries.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Removes all queries. Identifiers returned before become invalid.
    pub fn clear(&mut self) {
        self.queries.clear();
        self.signatures.clear();
        self.by_tag.clear();
        self.match_all.clear();
    }

    /// Counts entities which are wrongly present in or missing from queries.
    pub fn verify(&self, entities: &EntityManager) -> usize {
        self.queries
            .values()
            .map(|query| {
                let stale = query
                    .matched()
                    .filter(|&(order, entity)| {
                        entities.get(entity).map(EntityEntry::order) != Some(order)
                    })
                    .count();
                let wrong = entities
                    .iter()
                    .filter(|(_, entry)| query.matches(entry) != query.contains_order(entry.order()))
                    .count();
                stale + wrong
            })
            .sum()
    }

    /// Repairs all queries by scanning all entities.
    ///
    /// Returns count of repaired entries.
    ///
    pub fn refresh(&mut self, entities: &EntityManager) -> usize {
        let mut repaired = 0;
        for query in self.queries.values_mut() {
            let stale: Vec<_> = query
                .matched()
                .filter(|&(order, entity)| {
                    entities.get(entity).map(EntityEntry::order) != Some(order)
                })
                .map(|(order, _)| order)
                .collect();
            for order in stale {
                query.remove(order);
                repaired += 1;
            }
            for (entity, entry) in entities.iter() {
                if query.matches(entry) != query.contains_order(entry.order()) {
                    query.update(entity, entry);
                    repaired += 1;
                }
            }
        }
        repaired
    }

    /// Identifiers of queries which may be affected by a change of the entity.
    fn candidates(&self, entry: &EntityEntry) -> Vec<QueryId> {
        let mut ids: Vec<_> = entry
            .tags()
            .filter_map(|tag| self.by_tag.get(tag))
            .flatten()
            .chain(&self.match_all)
            .copied()
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn update_tagged(&mut self, tag: ComponentTag, mut f: impl FnMut(&mut Query)) {
        let ids = match self.by_tag.get(tag) {
            Some(ids) => ids,
            None => return,
        };
        for &id in ids {
            if let Some(query) = self.queries.get_mut(id) {
                f(query);
            }
        }
    }
}

impl EntityObserver for QueryManager {
    fn entity_added(&mut self, entity: Entity, entry: &EntityEntry) {
        for id in self.candidates(entry) {
            if let Some(query) = self.queries.get_mut(id) {
                query.update(entity, entry);
            }
        }
    }

    fn entity_removed(&mut self, _entity: Entity, entry: &EntityEntry) {
        for id in self.candidates(entry) {
            if let Some(query) = self.queries.get_mut(id) {
                query.remove(entry.order());
            }
        }
    }

    fn component_added(&mut self, entity: Entity, entry: &EntityEntry, tag: ComponentTag) {
        self.update_tagged(tag, |query| query.update(entity, entry));
    }

    fn component_removed(&mut self, _entity: Entity, entry: &EntityEntry, tag: ComponentTag) {
        self.update_tagged(tag, |query| query.remove(entry.order()));
    }
}
