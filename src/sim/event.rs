//! Events raised during a simulation step.
//!
//! Systems push events onto the frame queue; the tick drains it between
//! systems so every listener sees an event in the frame it was raised.
//! The drained events are handed back to the host for sound and screen
//! transitions.

use std::collections::VecDeque;

use super::components::Side;
use super::world::EntityId;
use crate::audio::SoundCue;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// `slot` on `side` was vacated; the enemy on slot `next_index` moves up
    SlotFreed {
        side: Side,
        slot: EntityId,
        next_index: u8,
    },
    /// An enemy was swept after being defeated
    EnemyKilled { side: Side },
    /// A front enemy outlasted its countdown
    PlayerHit { enemy: EntityId },
    /// Fire-and-forget sound for the host
    Sound { cue: SoundCue },
    /// Lives ran out or the chrono hit zero
    EndGame { score: u32 },
    /// Screen hand-off: show the final score
    ShowScore { score: u32 },
}

/// FIFO of events raised in the current frame
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: VecDeque<GameEvent>,
}

impl EventQueue {
    pub fn emit(&mut self, event: GameEvent) {
        self.pending.push_back(event);
    }

    pub fn pop(&mut self) -> Option<GameEvent> {
        self.pending.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
