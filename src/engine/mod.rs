//! The scorecard engine.
//!
//! - `scorecard`: `Scorecard`, the round-progression state machine
//! - `outcome`: derived results (`GamePhase`, `Winners`, `Standing`)

pub mod scorecard;
pub mod outcome;

pub use scorecard::{PendingAction, Scorecard};
pub use outcome::{GamePhase, Standing, Winners};
