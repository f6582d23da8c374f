//! Typed component store
//!
//! Every component kind lives in its own column keyed by [`EntityId`].
//! Columns are ordered maps so iteration is always by entity id, which keeps
//! the simulation deterministic. Entities refer to each other only by id.

use std::collections::BTreeMap;

use super::components::*;

/// Opaque entity handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u32);

impl EntityId {
    pub fn index(&self) -> u32 {
        self.0
    }
}

/// One component column
#[derive(Debug, Clone)]
pub struct Components<T> {
    items: BTreeMap<EntityId, T>,
}

impl<T> Default for Components<T> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<T> Components<T> {
    /// Attach (or replace) the component on `id`
    pub fn insert(&mut self, id: EntityId, value: T) {
        self.items.insert(id, value);
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        self.items.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.items.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entity ids holding this component, ascending
    pub fn ids(&self) -> Vec<EntityId> {
        self.items.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.items.iter().map(|(id, c)| (*id, c))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.items.iter_mut().map(|(id, c)| (*id, c))
    }
}

/// Owner of every entity and component in a session
#[derive(Debug, Clone, Default)]
pub struct World {
    next_id: u32,
    pub transforms: Components<Transform>,
    pub bounds: Components<Bounds>,
    pub sides: Components<Side>,
    pub slots: Components<Slot>,
    pub spawns: Components<SpawnPoint>,
    pub enemies: Components<Enemy>,
    pub dying: Components<Dying>,
    pub labels: Components<Label>,
    pub tracks: Components<Track>,
    pub players: Components<Player>,
    pub chronos: Components<Chrono>,
    pub score_meters: Components<ScoreMeter>,
    pub hit_zones: Components<HitZone>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new, empty entity
    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Allocate an entity with a transform
    pub fn spawn_at(&mut self, transform: Transform) -> EntityId {
        let id = self.spawn();
        self.transforms.insert(id, transform);
        id
    }

    /// Remove every component of `id`
    pub fn despawn(&mut self, id: EntityId) {
        self.transforms.remove(id);
        self.bounds.remove(id);
        self.sides.remove(id);
        self.slots.remove(id);
        self.spawns.remove(id);
        self.enemies.remove(id);
        self.dying.remove(id);
        self.labels.remove(id);
        self.tracks.remove(id);
        self.players.remove(id);
        self.chronos.remove(id);
        self.score_meters.remove(id);
        self.hit_zones.remove(id);
    }

    /// True if any column still holds `id`
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.transforms.contains(id)
            || self.bounds.contains(id)
            || self.sides.contains(id)
            || self.slots.contains(id)
            || self.spawns.contains(id)
            || self.enemies.contains(id)
            || self.dying.contains(id)
            || self.labels.contains(id)
            || self.tracks.contains(id)
            || self.players.contains(id)
            || self.chronos.contains(id)
            || self.score_meters.contains(id)
            || self.hit_zones.contains(id)
    }

    /// Enemies on `side`, ascending by id
    pub fn enemies_on(&self, side: Side) -> Vec<EntityId> {
        self.enemies
            .iter()
            .filter(|(id, _)| self.sides.get(*id) == Some(&side))
            .map(|(id, _)| id)
            .collect()
    }

    /// World-space box of an entity that has both a transform and bounds
    pub fn aabb(&self, id: EntityId) -> Option<Aabb> {
        let transform = self.transforms.get(id)?;
        let bounds = self.bounds.get(id)?;
        Some(Aabb::new(
            transform.translation,
            bounds.half_extents * transform.scale.abs(),
        ))
    }

    /// Slot record of `slot`. Panics if `slot` is not a slot: every enemy
    /// handle is assigned from the lane registry, so this is a broken contract.
    pub fn slot(&self, slot: EntityId) -> &Slot {
        self.slots
            .get(slot)
            .unwrap_or_else(|| panic!("entity {} is not a slot", slot.index()))
    }

    pub fn translation(&self, id: EntityId) -> glam::Vec3 {
        self.transforms
            .get(id)
            .map(|t| t.translation)
            .unwrap_or_default()
    }

    /// The single player entity, if the scene has one
    pub fn player_id(&self) -> Option<EntityId> {
        self.players.ids().first().copied()
    }
}
