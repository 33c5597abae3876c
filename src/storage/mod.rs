//! Persistence adapters and the persisted record layout.
//!
//! The engine talks to storage only through [`KeyValueStore`], a
//! synchronous string key/value interface modeled on browser local storage.
//! Adapters:
//!
//! - [`MemoryStore`]: in-process map, for tests and headless hosts
//! - [`FileStore`]: bincode-encoded file, for native hosts
//! - `LocalStorage` (feature `web`): `window.localStorage` in the browser
//!
//! ## Records
//!
//! The scorecard is persisted as four independent records under the
//! configured namespace:
//!
//! | Record | Encoding |
//! |---|---|
//! | `players` | JSON array of `{"id","name"}` |
//! | `scores` | JSON object: player id -> round index -> score |
//! | `currentRound` | decimal text, `0..=13` |
//! | `currentRoundScores` | JSON object: player id -> pending text |

pub mod memory;
pub mod file;
pub mod snapshot;
#[cfg(feature = "web")]
pub mod web;

pub use memory::MemoryStore;
pub use file::FileStore;
pub use snapshot::{Snapshot, SnapshotError};
#[cfg(feature = "web")]
pub use web::LocalStorage;

/// Errors raised by storage adapters.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file could not be encoded or decoded.
    #[error("storage encoding failed: {0}")]
    Encode(#[from] bincode::Error),

    /// The backend refused the operation (quota, privacy mode, no window).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous string key/value store.
///
/// Reads that fail are reported as absent by the adapter; writes report
/// errors so the engine can log them. The engine never retries.
pub trait KeyValueStore {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// The four persisted records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Record {
    Players,
    Scores,
    CurrentRound,
    CurrentRoundScores,
}

impl Record {
    /// Every record, in load order.
    pub const ALL: [Record; 4] = [
        Record::Players,
        Record::Scores,
        Record::CurrentRound,
        Record::CurrentRoundScores,
    ];

    /// Record name without the namespace prefix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Record::Players => "players",
            Record::Scores => "scores",
            Record::CurrentRound => "currentRound",
            Record::CurrentRoundScores => "currentRoundScores",
        }
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScorecardConfig;

    #[test]
    fn test_record_keys() {
        let config = ScorecardConfig::default();
        let keys: Vec<_> = Record::ALL.iter().map(|r| config.key(r.name())).collect();
        assert_eq!(
            keys,
            vec![
                "dutch_players",
                "dutch_scores",
                "dutch_currentRound",
                "dutch_currentRoundScores",
            ]
        );
    }

    #[test]
    fn test_store_through_mut_ref() {
        fn write_via<S: KeyValueStore>(mut store: S) {
            store.set("k", "v").unwrap();
        }

        let mut store = MemoryStore::new();
        write_via(&mut store);
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }
}
