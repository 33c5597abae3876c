//! Score storage: the committed ledger and the current round's pending text.
//!
//! - `scores`: `Ledger` of committed per-round scores (missing != 0)
//! - `pending`: `PendingInput`, raw text captured before a commit

pub mod scores;
pub mod pending;

pub use scores::{Ledger, RoundScores};
pub use pending::{is_score_text, parse_score, PendingInput};
