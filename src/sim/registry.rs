//! Entity registry
//!
//! Owns every live entity. Entities are kept sorted by id (ids are handed out
//! monotonically and appended) so iteration order is stable across runs.

use super::entity::{Entity, EntityId, EntityKind};

#[derive(Debug, Clone)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    next_id: EntityId,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Register an entity, assigning it a fresh id
    pub fn add(&mut self, mut entity: Entity) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        entity.id = id;
        self.entities.push(entity);
        id
    }

    /// Remove by id. Unknown ids are ignored (the entity may already be gone).
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.index_of(id)?;
        Some(self.entities.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.entities[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index_of(id).map(|i| &mut self.entities[i])
    }

    /// Entities of one kind, in id order
    pub fn iter(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter().filter(move |e| e.kind == kind)
    }

    pub fn iter_mut(&mut self, kind: EntityKind) -> impl Iterator<Item = &mut Entity> + '_ {
        self.entities.iter_mut().filter(move |e| e.kind == kind)
    }

    /// Every entity, in id order
    pub fn all(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter()
    }

    pub(crate) fn all_mut(&mut self) -> impl Iterator<Item = &mut Entity> + '_ {
        self.entities.iter_mut()
    }

    /// Mark an entity dead without removing it
    pub fn kill(&mut self, id: EntityId) {
        if let Some(entity) = self.get_mut(id) {
            entity.alive = false;
        }
    }

    /// Drop every dead entity, returning the removed ids in id order
    pub fn purge_dead(&mut self) -> Vec<EntityId> {
        let removed = self
            .entities
            .iter()
            .filter(|e| !e.alive)
            .map(|e| e.id)
            .collect();
        self.entities.retain(|e| e.alive);
        removed
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.iter(kind).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Hitbox;
    use glam::Vec2;

    fn enemy() -> Entity {
        Entity::new(EntityKind::Enemy, Vec2::ZERO, Hitbox::rect(32.0, 32.0))
    }

    fn torpedo() -> Entity {
        Entity::new(EntityKind::Projectile, Vec2::ZERO, Hitbox::Circle { radius: 8.0 })
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut registry = EntityRegistry::new();
        let a = registry.add(enemy());
        let b = registry.add(torpedo());
        let c = registry.add(enemy());
        assert!(a < b && b < c);
        assert_eq!(registry.get(b).map(|e| e.kind), Some(EntityKind::Projectile));
    }

    #[test]
    fn test_iterate_by_kind() {
        let mut registry = EntityRegistry::new();
        registry.add(enemy());
        registry.add(torpedo());
        registry.add(enemy());
        assert_eq!(registry.count(EntityKind::Enemy), 2);
        assert_eq!(registry.count(EntityKind::Projectile), 1);
        assert_eq!(registry.count(EntityKind::Player), 0);

        // Restartable: a second pass sees the same sequence
        let first: Vec<_> = registry.iter(EntityKind::Enemy).map(|e| e.id).collect();
        let second: Vec<_> = registry.iter(EntityKind::Enemy).map(|e| e.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let mut registry = EntityRegistry::new();
        let a = registry.add(enemy());
        registry.add(enemy());
        assert!(registry.remove(a).is_some());
        assert_eq!(registry.len(), 1);
        assert!(registry.remove(a).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_purge_dead() {
        let mut registry = EntityRegistry::new();
        let a = registry.add(enemy());
        let b = registry.add(torpedo());
        registry.kill(a);
        registry.kill(999);
        assert_eq!(registry.purge_dead(), vec![a]);
        assert!(registry.get(a).is_none());
        assert!(registry.get(b).is_some());
    }
}
