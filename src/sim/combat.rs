//! Player input and combat
//!
//! A lane triggers when any key of its chord is newly pressed. The player
//! leans toward that lane and every ready enemy on its front slot whose key
//! was pressed takes a hit.

use super::components::*;
use super::event::GameEvent;
use super::lanes::release_slot;
use super::spawner::scale_for_hit_points;
use super::state::GameState;
use super::world::EntityId;
use crate::consts::*;
use crate::input::FrameInput;

/// Which lane, if any, the player triggered this frame. Left wins ties.
pub fn triggered_side(state: &GameState, input: &FrameInput) -> Option<Side> {
    Side::BOTH
        .into_iter()
        .find(|side| input.is_any_just_pressed(state.keys_for(*side)))
}

/// Handle player movement and hits for one frame
pub fn player_system(state: &mut GameState, input: &FrameInput, dt: f32) {
    let Some(player_id) = state.world.player_id() else {
        return;
    };
    let cooldown = state
        .world
        .players
        .get(player_id)
        .map(|p| p.cooldown)
        .unwrap_or(0.0);

    if cooldown <= 0.0 {
        if let Some(side) = triggered_side(state, input) {
            if let Some(transform) = state.world.transforms.get_mut(player_id) {
                transform.translation.x = side.direction() * PLAYER_NUDGE;
            }
            if let Some(player) = state.world.players.get_mut(player_id) {
                player.cooldown = PLAYER_COOLDOWN;
            }

            for id in state.world.enemies_on(side) {
                let Some(enemy) = state.world.enemies.get(id) else {
                    continue;
                };
                if enemy.is_ready()
                    && state.world.slot(enemy.slot).is_front()
                    && input.is_key_just_pressed(enemy.key)
                {
                    hit_enemy(state, id);
                }
            }
        }
    } else if let Some(player) = state.world.players.get_mut(player_id) {
        player.cooldown -= dt;
    }

    if let Some(transform) = state.world.transforms.get_mut(player_id) {
        let x = transform.translation.x;
        transform.translation.x = x - x * PLAYER_EASE;
    }
}

/// Take one hit point off `id`. A defeated enemy frees its slot and is
/// marked for the sweep; a survivor shrinks.
pub fn hit_enemy(state: &mut GameState, id: EntityId) {
    let Some(enemy) = state.world.enemies.get_mut(id) else {
        return;
    };
    enemy.hit_points = enemy.hit_points.saturating_sub(1);
    let hit_points = enemy.hit_points;
    let label = enemy.label;

    if hit_points == 0 {
        release_slot(&mut state.world, &mut state.events, id);
        state.world.enemies.remove(id);
        state.world.dying.insert(id, Dying { label });
        if let Some(cue) = state.sounds.pick(&mut state.rng) {
            state.events.emit(GameEvent::Sound { cue });
        }
        log::debug!("enemy {} defeated", id.index());
    } else {
        let base = state.enemy_template.scale.y;
        if let Some(transform) = state.world.transforms.get_mut(id) {
            transform.scale.y = base * scale_for_hit_points(hit_points);
        }
        log::trace!("enemy {} down to {} hp", id.index(), hit_points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::scene::Scene;
    use crate::settings::Settings;
    use crate::sim::motion::enemy_motion_system;
    use crate::sim::spawner::spawn_enemy;

    fn state() -> GameState {
        let settings = Settings {
            max_hit_points: 1,
            spawn_interval: 1.0e9,
            ..Default::default()
        };
        GameState::new(&Scene::demo(), &settings).unwrap()
    }

    fn ready_enemy(state: &mut GameState, side: Side) -> EntityId {
        let id = spawn_enemy(state, side).unwrap();
        for _ in 0..120 {
            enemy_motion_system(state, SIM_DT);
            if state.world.enemies.get(id).unwrap().is_ready() {
                state.events = Default::default();
                return id;
            }
        }
        panic!("enemy never arrived");
    }

    fn ready_player(state: &mut GameState) {
        let id = state.world.player_id().unwrap();
        state.world.players.get_mut(id).unwrap().cooldown = 0.0;
    }

    #[test]
    fn test_kill_frees_slot_once() {
        let mut state = state();
        ready_player(&mut state);
        let id = ready_enemy(&mut state, Side::Left);
        let key = state.world.enemies.get(id).unwrap().key;
        let slot = state.world.enemies.get(id).unwrap().slot;

        player_system(&mut state, &FrameInput::pressing(&[key]), SIM_DT);

        assert!(!state.world.enemies.contains(id));
        assert!(state.world.dying.contains(id));
        assert!(!state.world.slot(slot).occupied);

        let mut freed = 0;
        while let Some(event) = state.events.pop() {
            if let GameEvent::SlotFreed { side, next_index, .. } = event {
                assert_eq!(side, Side::Left);
                assert_eq!(next_index, 2);
                freed += 1;
            }
        }
        assert_eq!(freed, 1);
    }

    #[test]
    fn test_kill_plays_a_sound() {
        let mut state = state();
        ready_player(&mut state);
        let id = ready_enemy(&mut state, Side::Right);
        let key = state.world.enemies.get(id).unwrap().key;
        player_system(&mut state, &FrameInput::pressing(&[key]), SIM_DT);

        let mut sounds = 0;
        while let Some(event) = state.events.pop() {
            if matches!(event, GameEvent::Sound { .. }) {
                sounds += 1;
            }
        }
        assert_eq!(sounds, 1);
    }

    #[test]
    fn test_wrong_key_only_moves_player() {
        let mut state = state();
        ready_player(&mut state);
        let id = ready_enemy(&mut state, Side::Left);
        let key = state.world.enemies.get(id).unwrap().key;
        let other = *state.keys_for(Side::Left).iter().find(|k| **k != key).unwrap();

        player_system(&mut state, &FrameInput::pressing(&[other]), SIM_DT);
        assert!(state.world.enemies.contains(id));
        assert!(state.events.is_empty());

        let player = state.world.player_id().unwrap();
        assert!(state.world.translation(player).x < 0.0);
        assert_eq!(state.player().unwrap().cooldown, PLAYER_COOLDOWN);
    }

    #[test]
    fn test_cooldown_blocks_hits() {
        let mut state = state();
        let id = ready_enemy(&mut state, Side::Left);
        let key = state.world.enemies.get(id).unwrap().key;
        state.player_mut().unwrap().cooldown = 0.1;

        player_system(&mut state, &FrameInput::pressing(&[key]), 0.05);
        assert!(state.world.enemies.contains(id));
        assert!((state.player().unwrap().cooldown - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_traveling_enemy_cannot_be_hit() {
        let mut state = state();
        ready_player(&mut state);
        let id = spawn_enemy(&mut state, Side::Left).unwrap();
        let key = state.world.enemies.get(id).unwrap().key;
        player_system(&mut state, &FrameInput::pressing(&[key]), SIM_DT);
        assert!(state.world.enemies.contains(id));
    }

    #[test]
    fn test_survivor_shrinks() {
        let mut state = state();
        ready_player(&mut state);
        let id = ready_enemy(&mut state, Side::Right);
        state.world.enemies.get_mut(id).unwrap().hit_points = 3;
        let key = state.world.enemies.get(id).unwrap().key;

        player_system(&mut state, &FrameInput::pressing(&[key]), SIM_DT);
        let enemy = state.world.enemies.get(id).unwrap();
        assert_eq!(enemy.hit_points, 2);
        assert_eq!(state.world.transforms.get(id).unwrap().scale.y, scale_for_hit_points(2));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_player_eases_back_to_center() {
        let mut state = state();
        ready_player(&mut state);
        let player = state.world.player_id().unwrap();
        player_system(&mut state, &FrameInput::pressing(&[Key::J]), SIM_DT);
        let first = state.world.translation(player).x;
        assert!(first > 0.0);
        for _ in 0..30 {
            player_system(&mut state, &FrameInput::default(), SIM_DT);
        }
        let later = state.world.translation(player).x;
        assert!(later > 0.0 && later < first);
    }

    #[test]
    fn test_empty_key_set_never_triggers() {
        let settings = Settings {
            custom_keys: Some(crate::settings::KeySets {
                left: Vec::new(),
                right: vec![Key::J],
            }),
            ..Default::default()
        };
        let state = GameState::new(&Scene::demo(), &settings).unwrap();
        assert_eq!(triggered_side(&state, &FrameInput::pressing(&[Key::S])), None);
        assert_eq!(triggered_side(&state, &FrameInput::pressing(&[Key::J])), Some(Side::Right));
    }
}
