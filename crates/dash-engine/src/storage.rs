//! High-score persistence.
//!
//! The engine persists exactly one integer. Any store failure is logged and
//! the keeper falls back to its in-memory copy for the rest of the session.
//! A stored value that does not parse is treated as absent and overwritten
//! by the next record.

use std::collections::HashMap;

use crate::error::StorageError;

/// Key the high score is stored under.
pub const HIGH_SCORE_KEY: &str = "dash.highScore";

/// String key-value store supplied by the host.
pub trait HighScoreStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Process-local store. Used in tests and when the host has no storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

pub struct HighScoreKeeper {
    store: Option<Box<dyn HighScoreStore>>,
    high_score: u32,
}

impl HighScoreKeeper {
    pub fn new(store: Option<Box<dyn HighScoreStore>>) -> Self {
        Self {
            store,
            high_score: 0,
        }
    }

    /// Read the persisted value. Missing or malformed values leave the
    /// in-memory score untouched.
    pub fn load(&mut self) -> u32 {
        let Some(store) = self.store.as_ref() else {
            return self.high_score;
        };
        match store.load(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => match parse_score(raw) {
                Ok(stored) => self.high_score = self.high_score.max(stored),
                Err(err) => log::warn!("ignoring stored high score: {}", err),
            },
            Ok(None) => {}
            Err(err) => self.degrade(err),
        }
        self.high_score
    }

    /// Record a finished session. Returns true if it set a new high score.
    /// The stored value never decreases.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.high_score {
            return false;
        }
        self.high_score = score;
        if let Some(store) = self.store.as_mut() {
            if let Err(err) = store.save(HIGH_SCORE_KEY, &score.to_string()) {
                self.degrade(err);
            }
        }
        log::info!("new high score: {}", score);
        true
    }

    pub fn reset(&mut self) {
        self.high_score = 0;
        if let Some(store) = self.store.as_mut() {
            if let Err(err) = store.remove(HIGH_SCORE_KEY) {
                self.degrade(err);
            }
        }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Whether writes still reach the host store.
    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    fn degrade(&mut self, err: StorageError) {
        log::warn!("high score storage disabled for this session: {}", err);
        self.store = None;
    }
}

fn parse_score(raw: String) -> Result<u32, StorageError> {
    raw.trim().parse().map_err(|_| StorageError::Corrupt(raw))
}
