//! Explicit registry of live hit-able entities.
//!
//! Bombs and overlap handlers consult this instead of searching the world.
//! Entities are registered when spawned and unregistered when destroyed or
//! despawned.

use hecs::Entity;

/// Insertion-ordered set of target entities.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    entities: Vec<Entity>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target. Registering twice is a no-op.
    pub fn register(&mut self, entity: Entity) {
        if !self.contains(entity) {
            self.entities.push(entity);
        }
    }

    /// Remove a target. Returns whether it was registered.
    pub fn unregister(&mut self, entity: Entity) -> bool {
        let before = self.entities.len();
        self.entities.retain(|&e| e != entity);
        self.entities.len() != before
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}
