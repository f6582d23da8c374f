//! Component types
//!
//! Plain data. Systems in sibling modules give them behavior.

use glam::Vec3;

pub use super::collision::Aabb;
use super::world::EntityId;
use crate::consts::*;
use crate::input::Key;

/// Position and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }
}

/// Local half-extents of an entity's box (before scale)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub half_extents: Vec3,
}

impl Bounds {
    pub fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }
}

/// Lane side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Direction the player leans when this side triggers
    pub fn direction(&self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// A waiting point in a lane. Index 1 is the front, nearest the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub index: u8,
    pub occupied: bool,
}

impl Slot {
    pub const FRONT: u8 = 1;

    pub fn new(index: u8) -> Self {
        Self {
            index,
            occupied: false,
        }
    }

    pub fn is_front(&self) -> bool {
        self.index == Self::FRONT
    }
}

/// Where enemies of a side materialize
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnPoint;

/// Enemy lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    /// Sliding toward its slot
    Traveling,
    /// Sitting on its slot, can be hit
    Ready,
}

/// An enemy queued in a lane
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub hit_points: u8,
    /// Key that hurts this enemy
    pub key: Key,
    pub state: EnemyState,
    /// Seconds since the current trip began
    pub elapsed: f32,
    /// Nominal trip length in seconds
    pub duration: f32,
    pub start: Vec3,
    pub target: Vec3,
    /// Assigned slot (non-owning)
    pub slot: EntityId,
    /// Floating letter destroyed with the enemy (non-owning)
    pub label: Option<EntityId>,
    /// Countdown while on the front slot
    pub waiting_hit: f32,
}

impl Enemy {
    pub fn new(slot: EntityId, key: Key, start: Vec3, target: Vec3) -> Self {
        Self {
            hit_points: 1,
            key,
            state: EnemyState::Traveling,
            elapsed: 0.0,
            duration: ENEMY_TRAVEL_DURATION,
            start,
            target,
            slot,
            label: None,
            waiting_hit: WAITING_HIT,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state == EnemyState::Ready
    }

    /// Interpolated position for the current trip. The ratio is left
    /// unclamped; arrival is decided by collision, not by time.
    pub fn interpolated(&self) -> Vec3 {
        self.start.lerp(self.target, self.elapsed / self.duration)
    }

    /// Begin a new trip from `from` toward `slot` at `target`
    pub fn retarget(&mut self, slot: EntityId, from: Vec3, target: Vec3) {
        self.slot = slot;
        self.start = from;
        self.target = target;
        self.elapsed = 0.0;
        self.state = EnemyState::Traveling;
    }
}

/// Marks an enemy killed this frame; the sweep removes it and its label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dying {
    pub label: Option<EntityId>,
}

/// Text the host renders for this entity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    pub text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Follow another entity's x coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    pub target: EntityId,
}

/// The player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub score: u32,
    /// Goes negative on the last missed enemy
    pub lives: i32,
    /// Seconds until the next move is accepted
    pub cooldown: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            cooldown: PLAYER_COOLDOWN,
        }
    }
}

/// Session countdown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chrono {
    pub time: f32,
}

impl Chrono {
    pub fn new(time: f32) -> Self {
        Self { time }
    }

    /// `seconds:hundredths`, as shown on the HUD
    pub fn display(&self) -> String {
        let t = self.time.max(0.0);
        let seconds = t as u32;
        let hundredths = ((t - seconds as f32) * 100.0) as u32;
        format!("{}:{:02}", seconds, hundredths)
    }
}

/// Score display with a pulse on each kill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreMeter {
    /// Seconds left in the current pulse
    pub pulse: f32,
    /// Current display scale (1.0 at rest)
    pub scale: f32,
}

impl Default for ScoreMeter {
    fn default() -> Self {
        Self {
            pulse: 0.0,
            scale: 1.0,
        }
    }
}

/// Impact area in front of the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitZone;
