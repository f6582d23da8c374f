//! Scoring, lives, HUD text and session end

use super::components::*;
use super::event::GameEvent;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// A swept enemy counts one point and pulses the score meter
pub fn on_enemy_killed(state: &mut GameState) {
    if let Some(player) = state.player_mut() {
        player.score += 1;
    }
    for (_, meter) in state.world.score_meters.iter_mut() {
        meter.pulse = SCORE_PULSE;
        meter.scale = SCORE_PULSE_SCALE;
    }
}

/// A front enemy timed out. Running out of lives ends the session.
pub fn on_player_hit(state: &mut GameState) {
    let Some(player) = state.player_mut() else {
        return;
    };
    player.lives -= 1;
    let (lives, score) = (player.lives, player.score);
    log::debug!("player hit, {} lives left", lives);
    if lives < 0 {
        state.events.emit(GameEvent::EndGame { score });
    }
}

/// First end-of-game wins; later ones are ignored
pub fn on_end_game(state: &mut GameState, score: u32) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    log::info!("game over, score {}", score);
    state.events.emit(GameEvent::ShowScore { score });
}

/// Remove every enemy marked `Dying`, along with its label
pub fn sweep_dying(state: &mut GameState) {
    for id in state.world.dying.ids() {
        let side = state.world.sides.get(id).copied();
        if let Some(Dying { label: Some(label) }) = state.world.dying.get(id).copied() {
            state.world.despawn(label);
        }
        state.world.despawn(id);
        match side {
            Some(side) => state.events.emit(GameEvent::EnemyKilled { side }),
            None => log::warn!("dying entity {} had no side", id.index()),
        }
    }
}

/// Keep tracking entities on their target's x coordinate
pub fn track_system(state: &mut GameState) {
    let world = &mut state.world;
    for id in world.tracks.ids() {
        let Some(target) = world.tracks.get(id).map(|t| t.target) else {
            continue;
        };
        let Some(x) = world.transforms.get(target).map(|t| t.translation.x) else {
            continue;
        };
        if let Some(transform) = world.transforms.get_mut(id) {
            transform.translation.x = x;
        }
    }
}

/// Refresh the score text and decay the kill pulse
pub fn score_meter_system(state: &mut GameState, dt: f32) {
    let score = state.score();
    let world = &mut state.world;
    for id in world.score_meters.ids() {
        let Some(meter) = world.score_meters.get_mut(id) else {
            continue;
        };
        meter.pulse = (meter.pulse - dt).max(0.0);
        meter.scale = 1.0 + (SCORE_PULSE_SCALE - 1.0) * meter.pulse / SCORE_PULSE;
        let scale = meter.scale;

        if let Some(label) = world.labels.get_mut(id) {
            label.text = format!("score: {} pts", score);
        }
        if let Some(transform) = world.transforms.get_mut(id) {
            transform.scale = glam::Vec3::splat(scale);
        }
    }
}

/// Count the session down and end it at zero
pub fn chrono_system(state: &mut GameState, dt: f32) {
    let score = state.score();
    let world = &mut state.world;
    let mut expired = false;
    for id in world.chronos.ids() {
        let Some(chrono) = world.chronos.get_mut(id) else {
            continue;
        };
        chrono.time -= dt;
        let text = chrono.display();
        expired |= chrono.time <= 0.0;
        if let Some(label) = world.labels.get_mut(id) {
            label.text = text;
        }
    }
    if expired {
        state.events.emit(GameEvent::EndGame { score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::settings::Settings;
    use crate::sim::spawner::spawn_enemy;
    use glam::Vec3;

    fn state() -> GameState {
        GameState::new(&Scene::demo(), &Settings::default()).unwrap()
    }

    fn drain(state: &mut GameState) -> Vec<GameEvent> {
        std::iter::from_fn(|| state.events.pop()).collect()
    }

    #[test]
    fn test_kill_scores_and_pulses() {
        let mut state = state();
        on_enemy_killed(&mut state);
        on_enemy_killed(&mut state);
        assert_eq!(state.score(), 2);
        let (_, meter) = state.world.score_meters.iter().next().unwrap();
        assert_eq!(meter.scale, SCORE_PULSE_SCALE);
        assert_eq!(meter.pulse, SCORE_PULSE);
    }

    #[test]
    fn test_lives_end_below_zero() {
        let mut state = state();
        for _ in 0..STARTING_LIVES {
            on_player_hit(&mut state);
        }
        assert_eq!(state.lives(), 0);
        assert!(state.events.is_empty());

        on_player_hit(&mut state);
        assert_eq!(state.lives(), -1);
        assert_eq!(drain(&mut state), vec![GameEvent::EndGame { score: 0 }]);
    }

    #[test]
    fn test_end_game_handled_once() {
        let mut state = state();
        on_end_game(&mut state, 7);
        on_end_game(&mut state, 9);
        assert!(state.is_over());
        assert_eq!(drain(&mut state), vec![GameEvent::ShowScore { score: 7 }]);
    }

    #[test]
    fn test_sweep_removes_enemy_and_label() {
        let mut state = state();
        let id = spawn_enemy(&mut state, Side::Left).unwrap();
        let label = state.world.enemies.get(id).unwrap().label;
        state.world.enemies.remove(id);
        state.world.dying.insert(id, Dying { label });

        sweep_dying(&mut state);
        assert!(!state.world.is_alive(id));
        assert!(!state.world.is_alive(label.unwrap()));
        assert_eq!(drain(&mut state), vec![GameEvent::EnemyKilled { side: Side::Left }]);

        sweep_dying(&mut state);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_label_follows_enemy_x() {
        let mut state = state();
        let id = spawn_enemy(&mut state, Side::Right).unwrap();
        let label = state.world.enemies.get(id).unwrap().label.unwrap();
        state.world.transforms.get_mut(id).unwrap().translation = Vec3::new(5.5, 0.0, 0.0);

        track_system(&mut state);
        let at = state.world.translation(label);
        assert_eq!(at.x, 5.5);
        assert_eq!(at.y, LABEL_HEIGHT);
    }

    #[test]
    fn test_score_text_and_pulse_decay() {
        let mut state = state();
        on_enemy_killed(&mut state);
        score_meter_system(&mut state, SCORE_PULSE / 2.0);

        let (id, meter) = state.world.score_meters.iter().next().unwrap();
        assert!((meter.scale - 1.25).abs() < 1e-5);
        assert_eq!(state.world.labels.get(id).unwrap().text, "score: 1 pts");

        score_meter_system(&mut state, SCORE_PULSE);
        let (_, meter) = state.world.score_meters.iter().next().unwrap();
        assert_eq!(meter.scale, 1.0);
    }

    #[test]
    fn test_chrono_counts_down_and_ends() {
        let settings = Settings {
            session_seconds: 1.0,
            ..Default::default()
        };
        let mut state = GameState::new(&Scene::demo(), &settings).unwrap();
        chrono_system(&mut state, 0.5);
        assert!(state.events.is_empty());
        let (id, _) = state.world.chronos.iter().next().unwrap();
        assert_eq!(state.world.labels.get(id).unwrap().text, "0:50");

        chrono_system(&mut state, 0.5);
        assert_eq!(drain(&mut state), vec![GameEvent::EndGame { score: 0 }]);
        assert_eq!(state.world.labels.get(id).unwrap().text, "0:00");
    }
}
