//! Enemy motion, arrival and lane reflow
//!
//! A traveling enemy slides from where it started toward its slot. Arrival is
//! decided by box overlap with the slot, after which the enemy snaps onto the
//! slot exactly. Once on the front slot it starts counting down to a hit on
//! the player.

use glam::Vec3;

use super::components::*;
use super::event::GameEvent;
use super::lanes::release_slot;
use super::state::GameState;
use super::world::EntityId;
use crate::consts::WAITING_HIT;

/// Advance every enemy by `dt`
pub fn enemy_motion_system(state: &mut GameState, dt: f32) {
    for id in state.world.enemies.ids() {
        let Some(enemy) = state.world.enemies.get(id) else {
            continue;
        };
        match enemy.state {
            EnemyState::Ready => tick_waiting(state, id, dt),
            EnemyState::Traveling => tick_traveling(state, id, dt),
        }
    }
}

fn tick_waiting(state: &mut GameState, id: EntityId, dt: f32) {
    let world = &mut state.world;
    let slot = match world.enemies.get(id) {
        Some(enemy) => enemy.slot,
        None => return,
    };
    if !world.slot(slot).is_front() {
        return;
    }
    let Some(enemy) = world.enemies.get_mut(id) else {
        return;
    };
    enemy.waiting_hit -= dt;
    if enemy.waiting_hit <= 0.0 {
        enemy.waiting_hit = WAITING_HIT;
        log::debug!("enemy {} hits the player", id.index());
        state.events.emit(GameEvent::PlayerHit { enemy: id });
    }
}

fn tick_traveling(state: &mut GameState, id: EntityId, dt: f32) {
    let world = &mut state.world;
    let Some(enemy) = world.enemies.get_mut(id) else {
        return;
    };
    let position = enemy.interpolated();
    enemy.elapsed += dt;
    let slot = enemy.slot;
    if let Some(transform) = world.transforms.get_mut(id) {
        transform.translation = position;
    }

    let arrived = match (world.aabb(id), world.aabb(slot)) {
        (Some(a), Some(b)) => a.overlaps(&b),
        _ => false,
    };
    if !arrived {
        return;
    }

    let target = world.translation(slot);
    if let Some(transform) = world.transforms.get_mut(id) {
        transform.translation = target;
    }
    if let Some(enemy) = world.enemies.get_mut(id) {
        enemy.state = EnemyState::Ready;
    }
    log::trace!("enemy {} ready on slot {}", id.index(), world.slot(slot).index);
}

/// Move the enemy queued on slot `next_index` of `side` up into `slot`.
/// The enemy's old slot is released in turn, so a gap ripples back through
/// the whole lane one event at a time.
pub fn on_slot_freed(state: &mut GameState, side: Side, slot: EntityId, next_index: u8) {
    let behind = state.world.enemies_on(side).into_iter().find(|id| {
        state
            .world
            .enemies
            .get(*id)
            .is_some_and(|e| state.world.slot(e.slot).index == next_index)
    });
    let Some(id) = behind else {
        return;
    };

    release_slot(&mut state.world, &mut state.events, id);

    let from: Vec3 = state.world.translation(id);
    let target = state.world.translation(slot);
    if let Some(enemy) = state.world.enemies.get_mut(id) {
        enemy.retarget(slot, from, target);
    }
    if let Some(record) = state.world.slots.get_mut(slot) {
        record.occupied = true;
    }
    log::debug!(
        "enemy {} moves up to {:?} slot {}",
        id.index(),
        side,
        state.world.slot(slot).index
    );
}
