//! Player preferences
//!
//! Persisted separately from tuning, in LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::sim::{GameState, RandomSource};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => 1024,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Paper-poof bursts on landing and impact
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Apply to a live game; the tuning cap still wins if it is lower
    pub fn apply<R: RandomSource>(&self, state: &mut GameState<R>) {
        state.particle_limit = self.max_particles().min(state.tuning.max_particles);
    }

    /// Decode a stored preferences blob; unreadable blobs fall back to defaults
    pub fn from_stored(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(err) => {
                log::warn!("Discarding stored settings: {}", err);
                None
            }
        }
    }

    /// Restore from LocalStorage, or defaults when nothing usable is stored
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web::storage()
            .and_then(|storage| storage.get_item(web::STORAGE_KEY).ok().flatten())
            .and_then(|json| Self::from_stored(&json));

        match stored {
            Some(settings) => {
                log::info!("Loaded settings: {:?}", settings);
                settings
            }
            None => Self::default(),
        }
    }

    /// Write to LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = web::storage() else {
            log::warn!("LocalStorage unavailable, settings not saved");
            return;
        };
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Failed to encode settings: {}", err);
                return;
            }
        };
        if let Err(err) = storage.set_item(web::STORAGE_KEY, &json) {
            log::warn!("Failed to save settings: {:?}", err);
        }
    }

    /// Native builds keep preferences for the process only
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}

#[cfg(target_arch = "wasm32")]
mod web {
    pub const STORAGE_KEY: &str = "paper_dash_settings";

    pub fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}
