//! Game state and session setup
//!
//! Everything a session needs to advance lives here: the component store,
//! the lane registry, the spawner timer, the seeded RNG and the frame event
//! queue.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::components::{Player, Side};
use super::event::EventQueue;
use super::lanes::LaneRegistry;
use super::spawner::Spawner;
use super::world::{EntityId, World};
use crate::audio::SoundBank;
use crate::input::Key;
use crate::scene::{EnemyTemplate, Scene, SceneError};
use crate::settings::{KeySets, Settings};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Session ended; the score hand-off has been emitted
    GameOver,
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub world: World,
    pub lanes: LaneRegistry,
    pub spawner: Spawner,
    pub keys: KeySets,
    pub sounds: SoundBank,
    pub enemy_template: EnemyTemplate,
    /// Events raised but not yet dispatched this frame
    pub events: EventQueue,
}

impl GameState {
    /// Build a fresh session from a scene. Restarting is just calling this again.
    pub fn new(scene: &Scene, settings: &Settings) -> Result<Self, SceneError> {
        let mut world = World::new();
        let enemy_template = scene.populate(&mut world, settings.session_seconds)?;
        let lanes = LaneRegistry::build(&world);
        log::info!(
            "session start: seed={} layout={} max_hp={}",
            settings.seed,
            settings.layout.as_str(),
            settings.max_hit_points
        );

        Ok(Self {
            seed: settings.seed,
            rng: Pcg32::seed_from_u64(settings.seed),
            phase: GamePhase::Playing,
            time_ticks: 0,
            world,
            lanes,
            spawner: Spawner::new(settings.spawn_interval, settings.max_hit_points),
            keys: settings.key_sets(),
            sounds: SoundBank {
                muted: settings.muted,
                ..Default::default()
            },
            enemy_template,
            events: EventQueue::default(),
        })
    }

    /// Keys belonging to a lane
    pub fn keys_for(&self, side: Side) -> &[Key] {
        self.keys.for_side(side)
    }

    pub fn player(&self) -> Option<&Player> {
        let id = self.world.player_id()?;
        self.world.players.get(id)
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        let id = self.world.player_id()?;
        self.world.players.get_mut(id)
    }

    pub fn score(&self) -> u32 {
        self.player().map(|p| p.score).unwrap_or(0)
    }

    pub fn lives(&self) -> i32 {
        self.player().map(|p| p.lives).unwrap_or(0)
    }

    /// Spawn point of `side`, if the scene has one
    pub fn spawn_point(&self, side: Side) -> Option<EntityId> {
        self.world
            .spawns
            .iter()
            .map(|(id, _)| id)
            .find(|id| self.world.sides.get(*id) == Some(&side))
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
