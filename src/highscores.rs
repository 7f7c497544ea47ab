//! High score persistence
//!
//! The best `shards_delivered` across sessions, stored as a plain integer
//! string under one key. Read once at session setup, written only when a
//! session ends with a better score. Storage failures are logged and
//! treated as "no high score yet"; they never stop a session.

use crate::platform::KeyValueStore;

/// Storage key for the best score
pub const STORAGE_KEY: &str = "aurexHighScore";

/// High score record backed by a key-value store
pub struct HighScore {
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for HighScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScore").finish_non_exhaustive()
    }
}

impl HighScore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Recorded best score, 0 if absent or unreadable
    pub fn read(&self) -> u64 {
        match self.store.get(STORAGE_KEY) {
            Ok(Some(raw)) => match parse_score(&raw) {
                Some(score) => {
                    log::info!("Loaded high score {}", score);
                    score
                }
                None => {
                    log::warn!("Ignoring unreadable high score {:?}", raw);
                    0
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("High score unavailable: {}", e);
                0
            }
        }
    }

    /// Persist a score; returns false if the store refused it
    pub fn write(&mut self, score: u64) -> bool {
        match self.store.set(STORAGE_KEY, &score.to_string()) {
            Ok(()) => {
                log::info!("High score saved ({})", score);
                true
            }
            Err(e) => {
                log::warn!("Skipping high score write: {}", e);
                false
            }
        }
    }

    /// Write `score` only if it beats `recorded`
    ///
    /// Returns true if a new high score was stored.
    pub fn submit(&mut self, score: u64, recorded: u64) -> bool {
        if !qualifies(score, recorded) {
            return false;
        }
        self.write(score)
    }
}

/// A score only counts if it strictly beats the recorded one
pub fn qualifies(score: u64, recorded: u64) -> bool {
    score > recorded
}

/// Integers, or a non-negative number written by an older client
fn parse_score(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(score) = raw.parse::<u64>() {
        return Some(score);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value.floor() as u64),
        _ => None,
    }
}
