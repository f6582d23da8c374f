//! Sound cue handles
//!
//! Playback is owned by the host. The simulation only decides *which* cue
//! fires and reports it through a [`GameEvent::Sound`](crate::sim::GameEvent).

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Preloaded kill sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    A,
    B,
    C,
}

impl SoundCue {
    pub const ALL: [SoundCue; 3] = [SoundCue::A, SoundCue::B, SoundCue::C];

    /// Asset the host should have preloaded for this cue
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundCue::A => "a.mp3",
            SoundCue::B => "b.mp3",
            SoundCue::C => "c.mp3",
        }
    }
}

/// The set of cues a kill may trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundBank {
    pub cues: Vec<SoundCue>,
    /// Muted banks never pick a cue
    #[serde(default)]
    pub muted: bool,
}

impl Default for SoundBank {
    fn default() -> Self {
        Self {
            cues: SoundCue::ALL.to_vec(),
            muted: false,
        }
    }
}

impl SoundBank {
    /// Pick a cue uniformly at random (fire-and-forget)
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<SoundCue> {
        if self.muted {
            return None;
        }
        self.cues.choose(rng).copied()
    }
}
