//! Committed per-player, per-round scores.
//!
//! A missing `(player, round)` entry means "not recorded yet" and is kept
//! distinct from a recorded score of 0: the scoreboard shows `-` for the
//! former. Totals skip missing entries.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, RoundIndex, ROUND_COUNT};

/// One player's committed scores keyed by round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundScores {
    rounds: OrdMap<RoundIndex, u32>,
}

impl RoundScores {
    /// Create an empty score row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score recorded for `round`, if any.
    #[must_use]
    pub fn get(&self, round: RoundIndex) -> Option<u32> {
        self.rounds.get(&round).copied()
    }

    /// Record a score, replacing any previous entry for that round.
    pub fn insert(&mut self, round: RoundIndex, score: u32) {
        self.rounds.insert(round, score);
    }

    /// Number of recorded rounds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// True if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Sum of the recorded scores over the playable rounds.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.rounds
            .range(..RoundIndex::END)
            .map(|(_, &score)| u64::from(score))
            .sum()
    }

    /// Highest round with a recorded score.
    #[must_use]
    pub fn highest_round(&self) -> Option<RoundIndex> {
        self.rounds.get_max().map(|(round, _)| *round)
    }

    /// Every round in order, `None` where nothing is recorded.
    #[must_use]
    pub fn row(&self) -> [Option<u32>; ROUND_COUNT] {
        let mut row = [None; ROUND_COUNT];
        for (round, &score) in self.rounds.range(..RoundIndex::END) {
            row[round.index()] = Some(score);
        }
        row
    }
}

/// Committed scores for every player.
///
/// ## Example
///
/// ```
/// use dutch_scorecard::core::{PlayerId, RoundIndex};
/// use dutch_scorecard::ledger::Ledger;
///
/// let alice = PlayerId::new("a");
/// let mut ledger = Ledger::new();
/// ledger.ensure_player(&alice);
///
/// ledger.record(&alice, RoundIndex::new(0), 5);
/// ledger.record(&alice, RoundIndex::new(1), 0);
///
/// assert_eq!(ledger.score(&alice, RoundIndex::new(1)), Some(0));
/// assert_eq!(ledger.score(&alice, RoundIndex::new(2)), None);
/// assert_eq!(ledger.total(&alice), 5);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    players: OrdMap<PlayerId, RoundScores>,
}

impl Ledger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty row for `player` if none exists.
    pub fn ensure_player(&mut self, player: &PlayerId) {
        if !self.players.contains_key(player) {
            self.players.insert(player.clone(), RoundScores::new());
        }
    }

    /// Record a score for one player and round.
    pub fn record(&mut self, player: &PlayerId, round: RoundIndex, score: u32) {
        self.ensure_player(player);
        if let Some(row) = self.players.get_mut(player) {
            row.insert(round, score);
        }
    }

    /// A player's score row.
    #[must_use]
    pub fn rounds(&self, player: &PlayerId) -> Option<&RoundScores> {
        self.players.get(player)
    }

    /// A player's score for one round.
    #[must_use]
    pub fn score(&self, player: &PlayerId, round: RoundIndex) -> Option<u32> {
        self.rounds(player).and_then(|row| row.get(round))
    }

    /// Sum of a player's recorded scores; 0 for unknown players.
    #[must_use]
    pub fn total(&self, player: &PlayerId) -> u64 {
        self.rounds(player).map_or(0, RoundScores::total)
    }

    /// Highest round recorded for any player.
    #[must_use]
    pub fn highest_round(&self) -> Option<RoundIndex> {
        self.players.values().filter_map(RoundScores::highest_round).max()
    }

    /// True if a row exists for `player`.
    #[must_use]
    pub fn contains(&self, player: &PlayerId) -> bool {
        self.players.contains_key(player)
    }

    /// Number of player rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// True if there are no player rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Drop rows whose player does not satisfy `keep`.
    ///
    /// Returns the number of rows removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&PlayerId) -> bool) -> usize {
        let dropped: Vec<PlayerId> = self
            .players
            .keys()
            .filter(|player| !keep(*player))
            .cloned()
            .collect();
        for player in &dropped {
            self.players.remove(player);
        }
        dropped.len()
    }

    /// Iterate over `(player, row)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &RoundScores)> {
        self.players.iter()
    }
}
