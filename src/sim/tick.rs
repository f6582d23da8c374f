//! Fixed timestep simulation tick
//!
//! Runs the systems in a fixed order. Events raised by a system are
//! dispatched before the next system runs, so a reflow chain or a game over
//! settles within the frame that caused it.

use super::combat::player_system;
use super::components::Side;
use super::event::GameEvent;
use super::motion::{enemy_motion_system, on_slot_freed};
use super::scoring::*;
use super::spawner::spawn_tick;
use super::state::GameState;
use crate::input::FrameInput;

/// Advance the game state by one fixed timestep. Returns every event
/// dispatched during the frame, in order, for the host to react to.
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) -> Vec<GameEvent> {
    let mut fired = Vec::new();
    if state.is_over() {
        return fired;
    }
    state.time_ticks += 1;

    // Idle/demo mode - press whatever the front enemy asks for
    let mut input = input.clone();
    if input.idle_mode {
        idle_presses(state, &mut input);
    }

    player_system(state, &input, dt);
    if dispatch(state, &mut fired) {
        return fired;
    }

    enemy_motion_system(state, dt);
    if dispatch(state, &mut fired) {
        return fired;
    }

    if state.spawner.advance(dt) {
        spawn_tick(state);
    }

    sweep_dying(state);
    if dispatch(state, &mut fired) {
        return fired;
    }

    track_system(state);
    score_meter_system(state, dt);
    chrono_system(state, dt);
    dispatch(state, &mut fired);

    fired
}

/// Drain the frame queue, routing each event to its listeners.
/// Returns true once the session is over.
fn dispatch(state: &mut GameState, fired: &mut Vec<GameEvent>) -> bool {
    while let Some(event) = state.events.pop() {
        log::trace!("tick {}: {:?}", state.time_ticks, event);
        match event {
            GameEvent::SlotFreed {
                side,
                slot,
                next_index,
            } => on_slot_freed(state, side, slot, next_index),
            GameEvent::EnemyKilled { .. } => on_enemy_killed(state),
            GameEvent::PlayerHit { .. } => on_player_hit(state),
            GameEvent::EndGame { score } => on_end_game(state, score),
            GameEvent::Sound { .. } | GameEvent::ShowScore { .. } => {}
        }
        fired.push(event);
    }
    state.is_over()
}

fn idle_presses(state: &GameState, input: &mut FrameInput) {
    for side in Side::BOTH {
        for id in state.world.enemies_on(side) {
            let Some(enemy) = state.world.enemies.get(id) else {
                continue;
            };
            if enemy.is_ready() && state.world.slot(enemy.slot).is_front() {
                input.press(enemy.key);
                return;
            }
        }
    }
}
