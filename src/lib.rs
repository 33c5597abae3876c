//! # dutch-scorecard
//!
//! Scorecard engine for Dutch, a 13-round card game where the lowest total
//! wins.
//!
//! ## Design Principles
//!
//! 1. **One owner of state**: [`Scorecard`] holds the roster, the ledger of
//!    committed scores, the round pointer and the pending input. Renderers
//!    read it and forward user intents as commands.
//!
//! 2. **Injected persistence**: state goes through a [`KeyValueStore`]
//!    after every mutation and is restored from it on startup. Tests use
//!    [`MemoryStore`]; browsers use local storage.
//!
//! 3. **Capture, then validate**: score text is stored as typed (digits
//!    only) and parsed strictly when a round is committed. A commit either
//!    records every player's score or changes nothing.
//!
//! ## Modules
//!
//! - `core`: players, rounds and jokers, id generation, configuration, errors
//! - `ledger`: committed scores and pending score text
//! - `engine`: the `Scorecard` state machine, winners and standings
//! - `storage`: key/value adapters, persisted records, rehydration
//! - `celebration`: timing of the game-over confetti show

pub mod core;
pub mod ledger;
pub mod engine;
pub mod storage;
pub mod celebration;

// Re-export commonly used types
pub use crate::core::{
    Joker, Player, PlayerId, Roster,
    RoundIndex, JOKERS, ROUND_COUNT,
    IdGenerator, ScorecardConfig, ScorecardError,
};

pub use crate::ledger::{Ledger, RoundScores, PendingInput};

pub use crate::engine::{Scorecard, PendingAction, GamePhase, Standing, Winners};

pub use crate::storage::{KeyValueStore, StoreError, MemoryStore, FileStore, Record, Snapshot, SnapshotError};
#[cfg(feature = "web")]
pub use crate::storage::LocalStorage;

pub use crate::celebration::{Burst, Celebration, CelebrationConfig};
