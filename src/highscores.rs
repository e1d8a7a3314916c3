//! High score persistence
//!
//! The simulation only needs a get/set contract for the best kill count.
//! Native builds keep it in a small JSON file; browser builds use LocalStorage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reading or writing a stored high score
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score io: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score format: {0}")]
    Format(#[from] serde_json::Error),
    #[error("storage unavailable")]
    Unavailable,
}

/// Persistence collaborator
pub trait HighScoreStore {
    /// Stored best, 0 when absent or unreadable
    fn high_score(&self) -> u32;
    fn set_high_score(&mut self, value: u32);
}

/// Persist `kills` if it beats the stored best; returns the resulting best
pub fn record_kills(store: &mut impl HighScoreStore, kills: u32) -> u32 {
    let previous = store.high_score();
    if kills > previous {
        store.set_high_score(kills);
        log::info!("New high score: {} (was {})", kills, previous);
        kills
    } else {
        previous
    }
}

/// On-disk record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub kills: u32,
}

/// Non-persistent store (tests, demos)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: u32,
}

impl HighScoreStore for MemoryStore {
    fn high_score(&self) -> u32 {
        self.value
    }

    fn set_high_score(&mut self, value: u32) {
        self.value = value;
    }
}

/// JSON file store
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<HighScoreRecord, StoreError> {
        let json = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, record: HighScoreRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&record)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for JsonFileStore {
    fn high_score(&self) -> u32 {
        match self.load() {
            Ok(record) => record.kills,
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => {
                log::warn!("Ignoring high score at {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn set_high_score(&mut self, value: u32) {
        if let Err(e) = self.save(HighScoreRecord { kills: value }) {
            log::warn!("Failed to save high score to {}: {}", self.path.display(), e);
        }
    }
}

/// Browser LocalStorage store
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "claw_arena_high_score";

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn high_score(&self) -> u32 {
        Self::storage()
            .ok()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    fn set_high_score(&mut self, value: u32) {
        match Self::storage() {
            Ok(storage) => {
                if storage.set_item(Self::STORAGE_KEY, &value.to_string()).is_err() {
                    log::warn!("LocalStorage rejected high score write");
                }
            }
            Err(e) => log::warn!("High score not saved: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_maximum() {
        let mut store = MemoryStore { value: 7 };
        assert_eq!(record_kills(&mut store, 3), 7);
        assert_eq!(store.high_score(), 7);
        assert_eq!(record_kills(&mut store, 12), 12);
        assert_eq!(store.high_score(), 12);
        assert_eq!(record_kills(&mut store, 12), 12);
    }

    #[test]
    fn test_memory_store_defaults_to_zero() {
        assert_eq!(MemoryStore::default().high_score(), 0);
    }
}
