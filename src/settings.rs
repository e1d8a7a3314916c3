//! Game settings and preferences
//!
//! Persisted as JSON: a file on native, LocalStorage in the browser.

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::sim::Arena;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Simulation ===
    /// Fixed RNG seed; a fresh random seed per run when unset
    pub seed: Option<u64>,

    // === Persistence ===
    /// High score file (native only)
    pub high_score_path: String,

    // === Headless driver ===
    /// Upper bound on ticks for a headless run
    pub headless_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            seed: None,
            high_score_path: "claw_arena_highscore.json".to_string(),
            headless_ticks: 60 * 60 * 10,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "claw_arena_settings";

    pub fn arena(&self) -> Arena {
        Arena {
            width: self.arena_width.max(1.0),
            height: self.arena_height.max(1.0),
        }
    }

    /// Seed for the next run
    pub fn next_seed(&self) -> u64 {
        #[cfg(target_arch = "wasm32")]
        let fresh = || js_sys::Date::now() as u64;
        #[cfg(not(target_arch = "wasm32"))]
        let fresh = rand::random::<u64>;
        self.seed.unwrap_or_else(fresh)
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) {
        let path = path.as_ref();
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Failed to save settings to {}: {}", path.display(), e);
                }
            }
            Err(e) => log::warn!("Failed to encode settings: {}", e),
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"seed": 42}"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.arena_width, ARENA_WIDTH);
        assert_eq!(settings.next_seed(), 42);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("claw_arena_settings_{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(9),
            arena_width: 640.0,
            ..Default::default()
        };
        settings.save_to(&path);
        assert_eq!(Settings::load_from(&path), settings);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_arena_never_degenerate() {
        let settings = Settings {
            arena_width: 0.0,
            ..Default::default()
        };
        assert_eq!(settings.arena().width, 1.0);
    }
}
