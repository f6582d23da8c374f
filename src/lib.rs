//! Lane Strike - A two-lane typing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, spawner, enemy motion, combat, scoring)
//! - `scene`: Scene node classification into component bundles
//! - `input`: Per-frame "just pressed" key queries
//! - `audio`: Sound cue handles emitted by the simulation
//! - `settings`: Data-driven configuration (key layout, difficulty, session length)

pub mod audio;
pub mod input;
pub mod scene;
pub mod settings;
pub mod sim;

pub use input::{FrameInput, Key};
pub use scene::{Scene, SceneError, SceneNode};
pub use settings::{KeyLayout, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Seconds between spawner ticks
    pub const SPAWN_INTERVAL: f32 = 0.5;
    /// Default ceiling for enemy hit points
    pub const MAX_HIT_POINTS: u8 = 3;

    /// Seconds an enemy takes to slide from spawn point to its slot
    pub const ENEMY_TRAVEL_DURATION: f32 = 0.3;
    /// Seconds a front-slot enemy waits before hurting the player
    pub const WAITING_HIT: f32 = 1.0;

    /// Seconds between two accepted player moves
    pub const PLAYER_COOLDOWN: f32 = 0.125;
    /// Player lateral nudge when a side is triggered
    pub const PLAYER_NUDGE: f32 = 1.0;
    /// Fraction of the remaining distance to center covered each frame
    pub const PLAYER_EASE: f32 = 0.1;
    /// Lives at session start
    pub const STARTING_LIVES: i32 = 3;

    /// Session length in seconds
    pub const SESSION_SECONDS: f32 = 60.0;

    /// Score display pulse length (seconds) and peak scale
    pub const SCORE_PULSE: f32 = 0.4;
    pub const SCORE_PULSE_SCALE: f32 = 1.5;

    /// Height of an enemy's letter above the enemy
    pub const LABEL_HEIGHT: f32 = 4.0;
}
