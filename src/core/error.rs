//! Errors returned by scorecard commands.
//!
//! Every variant is a user-facing notice, never a crash: a failed command
//! leaves the scorecard exactly as it was. The `Display` text is what the
//! notice dialog shows.

use super::player::PlayerId;

/// Errors that can occur while driving the scorecard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScorecardError {
    /// All 13 rounds are committed; only a reset can continue.
    #[error("All rounds are complete! Please reset the game to start a new one.")]
    GameAlreadyOver,

    /// At least one player has no valid pending score.
    #[error("Please enter scores for all players before moving to the next round.")]
    IncompleteRound {
        /// Players whose pending score is empty or not a valid number, in roster order.
        players: Vec<PlayerId>,
    },

    /// A round cannot be committed before anyone has joined.
    #[error("Add at least one player before entering scores.")]
    NoPlayers,

    /// The player id is not on the roster.
    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),

    /// `confirm()` was called with no action awaiting confirmation.
    #[error("there is nothing to confirm")]
    NothingToConfirm,
}
