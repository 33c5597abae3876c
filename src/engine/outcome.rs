//! Derived results: game phase, winners and scoreboard rows.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Player, PlayerId, Roster, ROUND_COUNT};
use crate::ledger::Ledger;

/// Where a game stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// No round committed yet. Players may still be joining.
    Setup,
    /// At least one round committed, fewer than 13.
    InProgress,
    /// All 13 rounds committed. Only a reset leaves this phase.
    Complete,
}

/// Names of the player(s) with the lowest total, in roster order.
///
/// A single winner is the common case, so up to two names are stored inline.
///
/// ```
/// use dutch_scorecard::engine::Winners;
///
/// let winners: Winners = ["Alice", "Bob"].into_iter().map(String::from).collect();
/// assert_eq!(winners.to_string(), "Alice & Bob");
/// assert!(winners.contains("Bob"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Winners(SmallVec<[String; 2]>);

impl Winners {
    /// No winners.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Lowest-total players of a finished game.
    ///
    /// Ties keep every tied player, in roster order. An empty roster has
    /// no winners.
    #[must_use]
    pub fn compute(roster: &Roster, ledger: &Ledger) -> Self {
        let Some(lowest) = roster.ids().map(|id| ledger.total(id)).min() else {
            return Self::none();
        };

        roster
            .iter()
            .filter(|player| ledger.total(&player.id) == lowest)
            .map(|player| player.name.clone())
            .collect()
    }

    /// True if `name` is among the winners.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|w| w == name)
    }

    /// Winner names.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Number of winners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no winners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for Winners {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for Winners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(" & "))
    }
}

/// One scoreboard row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub id: PlayerId,
    pub name: String,

    /// Committed score per round, `None` where nothing is recorded.
    pub rounds: [Option<u32>; ROUND_COUNT],

    pub total: u64,

    /// Set only once the game is complete.
    pub is_winner: bool,
}

impl Standing {
    /// Build a row. `winning_total` is the lowest total of a finished game.
    pub(crate) fn new(player: &Player, ledger: &Ledger, winning_total: Option<u64>) -> Self {
        let total = ledger.total(&player.id);
        let rounds = ledger
            .rounds(&player.id)
            .map_or([None; ROUND_COUNT], |row| row.row());
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            rounds,
            total,
            is_winner: winning_total == Some(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RoundIndex;

    fn setup(totals: &[(&str, u32)]) -> (Roster, Ledger) {
        let mut roster = Roster::new();
        let mut ledger = Ledger::new();
        for (i, (name, total)) in totals.iter().enumerate() {
            let id = PlayerId::new(format!("p{i}"));
            roster.push(Player::new(id.clone(), *name));
            ledger.record(&id, RoundIndex::new(0), *total);
        }
        (roster, ledger)
    }

    #[test]
    fn test_single_winner() {
        let (roster, ledger) = setup(&[("Alice", 5), ("Bob", 123)]);
        let winners = Winners::compute(&roster, &ledger);
        assert_eq!(winners.names(), &["Alice".to_string()]);
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let (roster, ledger) = setup(&[("Cara", 9), ("Alice", 4), ("Bob", 4)]);
        let winners = Winners::compute(&roster, &ledger);
        assert_eq!(winners.names(), &["Alice".to_string(), "Bob".to_string()]);
        assert_eq!(winners.to_string(), "Alice & Bob");
    }

    #[test]
    fn test_empty_roster_has_no_winners() {
        let winners = Winners::compute(&Roster::new(), &Ledger::new());
        assert!(winners.is_empty());
    }

    #[test]
    fn test_player_without_scores_counts_as_zero() {
        let (mut roster, ledger) = setup(&[("Alice", 3)]);
        roster.push(Player::new(PlayerId::new("late"), "Late"));
        let winners = Winners::compute(&roster, &ledger);
        assert_eq!(winners.names(), &["Late".to_string()]);
    }

    #[test]
    fn test_standing_row() {
        let (roster, ledger) = setup(&[("Alice", 5)]);
        let player = roster.iter().next().unwrap();

        let standing = Standing::new(player, &ledger, Some(5));
        assert_eq!(standing.rounds[0], Some(5));
        assert_eq!(standing.rounds[1], None);
        assert_eq!(standing.total, 5);
        assert!(standing.is_winner);

        assert!(!Standing::new(player, &ledger, None).is_winner);
    }

    #[test]
    fn test_same_name_different_totals() {
        let (roster, ledger) = setup(&[("Sam", 2), ("Sam", 8)]);
        let rows: Vec<_> = roster.iter().map(|p| Standing::new(p, &ledger, Some(2))).collect();
        assert!(rows[0].is_winner);
        assert!(!rows[1].is_winner);
    }
}
