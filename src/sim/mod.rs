//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod combat;
pub mod components;
pub mod event;
pub mod lanes;
pub mod motion;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::Aabb;
pub use components::{
    Bounds, Chrono, Dying, Enemy, EnemyState, Label, Player, ScoreMeter, Side, Slot, Transform,
};
pub use event::{EventQueue, GameEvent};
pub use lanes::LaneRegistry;
pub use spawner::Spawner;
pub use state::{GamePhase, GameState};
pub use tick::tick;
pub use world::{Components, EntityId, World};
