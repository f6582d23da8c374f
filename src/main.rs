//! Lane Strike headless runner
//!
//! Plays one session in idle mode at a fixed step and reports the outcome.
//!
//! Usage: `lane-strike [settings.json] [scene.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use lane_strike::consts::*;
    use lane_strike::sim::{GameEvent, GameState, tick};
    use lane_strike::{FrameInput, Scene, SceneError, Settings};

    /// Host frame length fed to the accumulator (a 30 Hz display)
    const HOST_FRAME: f32 = 1.0 / 30.0;

    /// Session driver holding the fixed-step accumulator
    struct Runner {
        state: GameState,
        accumulator: f32,
        input: FrameInput,
        kills: u32,
        sounds: u32,
        hits: u32,
    }

    impl Runner {
        fn new(state: GameState) -> Self {
            Self {
                state,
                accumulator: 0.0,
                input: FrameInput {
                    idle_mode: true,
                    ..Default::default()
                },
                kills: 0,
                sounds: 0,
                hits: 0,
            }
        }

        /// Run simulation ticks for one host frame. Returns the final score
        /// once the session hands off to the score screen.
        fn update(&mut self, dt: f32) -> Option<u32> {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            let mut shown = None;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                for event in tick(&mut self.state, &self.input, SIM_DT) {
                    match event {
                        GameEvent::EnemyKilled { .. } => self.kills += 1,
                        GameEvent::PlayerHit { .. } => self.hits += 1,
                        GameEvent::Sound { cue } => {
                            self.sounds += 1;
                            log::trace!("play {}", cue.file_name());
                        }
                        GameEvent::ShowScore { score } => shown = Some(score),
                        GameEvent::SlotFreed { .. } | GameEvent::EndGame { .. } => {}
                    }
                }
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            shown
        }
    }

    fn load_scene(path: Option<&str>) -> Result<Scene, SceneError> {
        match path {
            Some(path) => {
                log::info!("Loading scene from {}", path);
                Scene::load_from_file(path)
            }
            None => Ok(Scene::demo()),
        }
    }

    pub fn run() -> Result<(), SceneError> {
        let mut args = std::env::args().skip(1);
        let settings = match args.next() {
            Some(path) => Settings::load_or_default(path),
            None => Settings::default(),
        };
        let scene = load_scene(args.next().as_deref())?;

        let mut runner = Runner::new(GameState::new(&scene, &settings)?);
        let max_frames = ((settings.session_seconds + 5.0) / HOST_FRAME) as u64;
        let mut score = None;
        for _ in 0..max_frames {
            score = runner.update(HOST_FRAME);
            if score.is_some() {
                break;
            }
        }

        let state = &runner.state;
        match score {
            Some(score) => println!(
                "score: {} pts ({} kills, {} hits taken, {} lives left, {} sounds, {} ticks)",
                score,
                runner.kills,
                runner.hits,
                state.lives(),
                runner.sounds,
                state.time_ticks
            ),
            None => log::warn!("session did not end after {} frames", max_frames),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lane Strike (headless) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is embedded by a host engine on this target
}
