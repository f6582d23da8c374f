//! Lane registry
//!
//! Per side, the slot entities sorted front to back. New enemies always join
//! the back of the queue, so arrival order is preserved.

use super::components::Side;
use super::event::{EventQueue, GameEvent};
use super::world::{EntityId, World};

#[derive(Debug, Clone, Default)]
pub struct LaneRegistry {
    left: Vec<EntityId>,
    right: Vec<EntityId>,
}

impl LaneRegistry {
    /// Collect and sort every slot in the world. Call once per session.
    pub fn build(world: &World) -> Self {
        let mut registry = Self::default();
        for (id, _) in world.slots.iter() {
            match world.sides.get(id) {
                Some(Side::Left) => registry.left.push(id),
                Some(Side::Right) => registry.right.push(id),
                None => log::warn!("slot {} has no side, ignored", id.index()),
            }
        }
        registry.left.sort_by_key(|id| world.slot(*id).index);
        registry.right.sort_by_key(|id| world.slot(*id).index);
        log::debug!(
            "lanes: {} left slots, {} right slots",
            registry.left.len(),
            registry.right.len()
        );
        registry
    }

    /// Slots of `side`, front first
    pub fn slots(&self, side: Side) -> &[EntityId] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Slot a new enemy on `side` should queue into, or `None` if the lane is full
    pub fn first_available(&self, world: &World, side: Side) -> Option<EntityId> {
        let slots = self.slots(side);
        let last_occupied = slots.iter().rposition(|id| world.slot(*id).occupied);
        match last_occupied {
            None => slots.first().copied(),
            Some(pos) => slots.get(pos + 1).copied(),
        }
    }
}

/// Vacate the slot held by `enemy` and announce it, so the enemy queued
/// directly behind can move up. Panics if `enemy` is not an enemy with a side.
pub fn release_slot(world: &mut World, events: &mut EventQueue, enemy: EntityId) {
    let slot = match world.enemies.get(enemy) {
        Some(e) => e.slot,
        None => panic!("entity {} is not an enemy", enemy.index()),
    };
    let side = match world.sides.get(enemy) {
        Some(side) => *side,
        None => panic!("enemy {} has no side", enemy.index()),
    };
    let index = world.slot(slot).index;
    if let Some(record) = world.slots.get_mut(slot) {
        record.occupied = false;
    }
    events.emit(GameEvent::SlotFreed {
        side,
        slot,
        next_index: index + 1,
    });
}
