//! Enemy spawner
//!
//! Every `interval` seconds: pick a lane, find the back of its queue, and
//! instantiate the enemy template at the lane's spawn point. The target slot
//! is marked occupied in the same step, before any other spawn can query it.

use glam::Vec3;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::components::*;
use super::state::GameState;
use super::world::EntityId;
use crate::consts::LABEL_HEIGHT;

/// Periodic spawn timer
#[derive(Debug, Clone)]
pub struct Spawner {
    pub interval: f32,
    pub elapsed: f32,
    /// Ceiling for rolled hit points (clamped to 1..=3)
    pub max_hit_points: u8,
}

impl Spawner {
    pub fn new(interval: f32, max_hit_points: u8) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            max_hit_points,
        }
    }

    /// Advance the timer; true when a spawn attempt is due
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            true
        } else {
            false
        }
    }
}

/// Hit points for a new enemy. One uniform draw against cumulative
/// thresholds: max 2 gives 75/25, max 3 gives 50/30/20.
pub fn roll_hit_points<R: Rng + ?Sized>(max: u8, rng: &mut R) -> u8 {
    match max {
        0 | 1 => 1,
        2 => {
            if rng.random::<f32>() < 0.75 {
                1
            } else {
                2
            }
        }
        _ => {
            let roll = rng.random::<f32>();
            if roll < 0.5 {
                1
            } else if roll < 0.8 {
                2
            } else {
                3
            }
        }
    }
}

/// Vertical scale for an enemy with `hit_points` left
pub fn scale_for_hit_points(hit_points: u8) -> f32 {
    match hit_points {
        0 => 0.5,
        1 => 0.75,
        2 => 1.0,
        _ => 1.25,
    }
}

/// One spawner tick: pick a side at random and try to spawn there
pub fn spawn_tick(state: &mut GameState) -> Option<EntityId> {
    let side = if state.rng.random_bool(0.5) {
        Side::Left
    } else {
        Side::Right
    };
    spawn_enemy(state, side)
}

/// Spawn an enemy on `side`. Returns `None` (and changes nothing) when the
/// lane is full, has no spawn point, or has no keys.
pub fn spawn_enemy(state: &mut GameState, side: Side) -> Option<EntityId> {
    let Some(slot) = state.lanes.first_available(&state.world, side) else {
        log::trace!("{:?} lane full, skipping spawn", side);
        return None;
    };
    let Some(spawn) = state.spawn_point(side) else {
        log::debug!("no {:?} spawn point", side);
        return None;
    };
    let Some(key) = state.keys.for_side(side).choose(&mut state.rng).copied() else {
        log::debug!("empty {:?} key set, skipping spawn", side);
        return None;
    };
    let hit_points = roll_hit_points(state.spawner.max_hit_points, &mut state.rng);

    let world = &mut state.world;
    let template = state.enemy_template;
    let from = world.translation(spawn);
    let target = world.translation(slot);

    let mut scale = template.scale;
    scale.y *= scale_for_hit_points(hit_points);
    let enemy_id = world.spawn_at(Transform {
        translation: from,
        scale,
    });

    let label_id = world.spawn_at(Transform::at(from + Vec3::new(0.0, LABEL_HEIGHT, 0.0)));
    world.labels.insert(label_id, Label::new(key.as_str()));
    world.tracks.insert(label_id, Track { target: enemy_id });

    let mut enemy = Enemy::new(slot, key, from, target);
    enemy.hit_points = hit_points;
    enemy.label = Some(label_id);
    world.bounds.insert(enemy_id, template.bounds);
    world.sides.insert(enemy_id, side);
    world.enemies.insert(enemy_id, enemy);

    if let Some(slot) = world.slots.get_mut(slot) {
        slot.occupied = true;
    }

    log::debug!(
        "spawned enemy {} on {:?} slot {} key {} hp {}",
        enemy_id.index(),
        side,
        world.slot(slot).index,
        key.as_str(),
        hit_points
    );
    Some(enemy_id)
}
