//! Player preferences
//!
//! Persisted as JSON next to the best score, separately from it.

use serde::{Deserialize, Serialize};

use crate::persistence::KvStore;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Behavior ===
    /// Pause automatically when the tab is hidden or the window loses focus
    pub pause_on_blur: bool,

    // === Audio ===
    pub muted: bool,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Accessibility ===
    /// Reduced motion (no bird tilt)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_fps: false,
            pause_on_blur: true,
            muted: false,
            sfx_volume: 0.8,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "flappy_settings";

    /// Effective sound volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// Load settings, falling back to defaults on missing or broken JSON
    pub fn load(store: &impl KvStore) -> Self {
        let Some(json) = store.read(Self::STORAGE_KEY) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl KvStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                store.write(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
            Err(e) => log::warn!("Failed to serialize settings: {}", e),
        }
    }
}
