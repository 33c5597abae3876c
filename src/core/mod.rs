//! Core scorecard types: players, rounds, ids, configuration, errors.
//!
//! These are the building blocks shared by the ledger, the engine and the
//! storage layer.

pub mod player;
pub mod round;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{Player, PlayerId, Roster};
pub use round::{Joker, RoundIndex, JOKERS, ROUND_COUNT};
pub use rng::IdGenerator;
pub use config::{ScorecardConfig, DEFAULT_NAMESPACE, DEFAULT_PRESETS};
pub use error::ScorecardError;
