//! Game settings
//!
//! Loaded from a JSON file next to the binary. Missing fields take defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::Key;
use crate::sim::components::Side;

/// Keyboard layout profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum KeyLayout {
    #[default]
    Azerty,
    /// See https://workmanlayout.org/
    Workman,
}

impl KeyLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyLayout::Azerty => "Azerty",
            KeyLayout::Workman => "Workman",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "azerty" => Some(KeyLayout::Azerty),
            "workman" => Some(KeyLayout::Workman),
            _ => None,
        }
    }

    /// Home-row keys for each hand
    pub fn key_sets(&self) -> KeySets {
        match self {
            KeyLayout::Azerty => KeySets {
                left: vec![Key::S, Key::D, Key::F],
                right: vec![Key::J, Key::K, Key::L],
            },
            KeyLayout::Workman => KeySets {
                left: vec![Key::S, Key::H, Key::T],
                right: vec![Key::N, Key::E, Key::O],
            },
        }
    }
}

/// Keys that trigger (and are assigned on) each lane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySets {
    pub left: Vec<Key>,
    pub right: Vec<Key>,
}

impl KeySets {
    pub fn for_side(&self, side: Side) -> &[Key] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Settings errors
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keyboard profile used for both lanes
    pub layout: KeyLayout,
    /// Explicit key sets, overriding the layout profile
    pub custom_keys: Option<KeySets>,

    // === Difficulty ===
    /// Highest hit-point count a spawned enemy may get (1-3)
    pub max_hit_points: u8,
    /// Seconds between spawn attempts
    pub spawn_interval: f32,
    /// Session length in seconds
    pub session_seconds: f32,

    // === Run ===
    /// RNG seed for the session
    pub seed: u64,

    // === Audio ===
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: KeyLayout::Azerty,
            custom_keys: None,

            max_hit_points: MAX_HIT_POINTS,
            spawn_interval: SPAWN_INTERVAL,
            session_seconds: SESSION_SECONDS,

            seed: 0x5eed,

            muted: false,
        }
    }
}

impl Settings {
    /// Settings for a layout profile, everything else default
    pub fn from_layout(layout: KeyLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Effective key sets
    pub fn key_sets(&self) -> KeySets {
        self.custom_keys
            .clone()
            .unwrap_or_else(|| self.layout.key_sets())
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load settings, falling back to defaults when the file is absent or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
