//! Best score persistence
//!
//! The game keeps exactly one durable value: the best score, stored as a
//! decimal string under [`BEST_SCORE_KEY`]. Storage is behind [`KvStore`] so
//! the core runs the same against `localStorage` and an in-memory map.

use std::collections::HashMap;

#[cfg(target_arch = "wasm32")]
pub mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

/// Storage key for the best score
pub const BEST_SCORE_KEY: &str = "best";

/// Synchronous string key-value storage
pub trait KvStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str);
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a single entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.write(key, value);
        store
    }
}

impl KvStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Parse a stored score. Any numeric text is accepted (`"12.0"`, `"1e1"`)
/// and floored; absent, malformed, negative or non-finite values are 0.
pub fn parse_score(raw: Option<&str>) -> u32 {
    let Some(value) = raw.and_then(|s| s.trim().parse::<f64>().ok()) else {
        return 0;
    };
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.floor().min(u32::MAX as f64) as u32
}

/// Best score across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    value: u32,
}

impl BestScore {
    /// Read the stored best score
    pub fn load(store: &impl KvStore) -> Self {
        let value = parse_score(store.read(BEST_SCORE_KEY).as_deref());
        log::info!("Loaded best score: {}", value);
        Self { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Fold a finished round into the best score and write it back.
    /// Returns true if the round set a new best.
    pub fn record(&mut self, score: u32, store: &mut impl KvStore) -> bool {
        let improved = score > self.value;
        self.value = self.value.max(score);
        store.write(BEST_SCORE_KEY, &self.value.to_string());
        if improved {
            log::info!("New best score: {}", self.value);
        }
        improved
    }
}
