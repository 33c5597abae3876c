//! The fixed 13-round sequence.
//!
//! Each round of Dutch has a "joker": the rank that is wild for that round.
//! The sequence always runs King down to Ace and is not configurable.
//!
//! ```
//! use dutch_scorecard::core::{Joker, RoundIndex, JOKERS, ROUND_COUNT};
//!
//! assert_eq!(JOKERS.len(), ROUND_COUNT);
//! assert_eq!(RoundIndex::new(0).joker(), Some(Joker::King));
//! assert_eq!(RoundIndex::new(12).joker(), Some(Joker::Ace));
//! assert_eq!(RoundIndex::new(13).joker(), None);
//! ```

use serde::{Deserialize, Serialize};

/// Number of rounds in a game.
pub const ROUND_COUNT: usize = 13;

/// Wild rank for a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Joker {
    King,
    Queen,
    Jack,
    Ten,
    Nine,
    Eight,
    Seven,
    Six,
    Five,
    Four,
    Three,
    Two,
    Ace,
}

/// Joker for each round, in play order.
pub const JOKERS: [Joker; ROUND_COUNT] = [
    Joker::King,
    Joker::Queen,
    Joker::Jack,
    Joker::Ten,
    Joker::Nine,
    Joker::Eight,
    Joker::Seven,
    Joker::Six,
    Joker::Five,
    Joker::Four,
    Joker::Three,
    Joker::Two,
    Joker::Ace,
];

impl Joker {
    /// Display label, as printed on the scoreboard header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Joker::King => "King",
            Joker::Queen => "Queen",
            Joker::Jack => "Jack",
            Joker::Ten => "10",
            Joker::Nine => "9",
            Joker::Eight => "8",
            Joker::Seven => "7",
            Joker::Six => "6",
            Joker::Five => "5",
            Joker::Four => "4",
            Joker::Three => "3",
            Joker::Two => "2",
            Joker::Ace => "Ace",
        }
    }
}

impl std::fmt::Display for Joker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 0-based round index.
///
/// Valid rounds are `0..ROUND_COUNT`. The round pointer of a finished game
/// equals `ROUND_COUNT`, so the type itself allows that value; use
/// [`RoundIndex::is_playable`] to tell the two apart.
///
/// Serialized as a bare integer. As a JSON map key it becomes a decimal
/// string (`"0"`, `"1"`, ...), matching the stored score layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundIndex(pub u8);

impl RoundIndex {
    /// First round.
    pub const FIRST: RoundIndex = RoundIndex(0);

    /// Pointer value once every round has been committed.
    pub const END: RoundIndex = RoundIndex(ROUND_COUNT as u8);

    /// Create a new round index.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the raw index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 1-based round number for display.
    #[must_use]
    pub const fn number(self) -> usize {
        self.0 as usize + 1
    }

    /// True for rounds `0..ROUND_COUNT`.
    #[must_use]
    pub const fn is_playable(self) -> bool {
        self.index() < ROUND_COUNT
    }

    /// True for the 13th round.
    #[must_use]
    pub const fn is_final(self) -> bool {
        self.index() + 1 == ROUND_COUNT
    }

    /// Joker for this round, `None` past the end.
    #[must_use]
    pub fn joker(self) -> Option<Joker> {
        JOKERS.get(self.index()).copied()
    }

    /// The following round, saturating at [`RoundIndex::END`].
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1).min(Self::END.0))
    }

    /// Iterate over every playable round.
    pub fn all() -> impl Iterator<Item = RoundIndex> {
        (0..ROUND_COUNT as u8).map(RoundIndex)
    }
}

impl std::fmt::Display for RoundIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.joker() {
            Some(joker) => write!(f, "R{} ({})", self.number(), joker),
            None => f.write_str("Game over"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joker_sequence() {
        assert_eq!(JOKERS[0], Joker::King);
        assert_eq!(JOKERS[3].label(), "10");
        assert_eq!(JOKERS[11].label(), "2");
        assert_eq!(JOKERS[12], Joker::Ace);
    }

    #[test]
    fn test_round_index_bounds() {
        assert!(RoundIndex::FIRST.is_playable());
        assert!(RoundIndex::new(12).is_playable());
        assert!(RoundIndex::new(12).is_final());
        assert!(!RoundIndex::END.is_playable());
        assert!(!RoundIndex::new(11).is_final());
    }

    #[test]
    fn test_round_next_saturates() {
        assert_eq!(RoundIndex::new(3).next(), RoundIndex::new(4));
        assert_eq!(RoundIndex::new(12).next(), RoundIndex::END);
        assert_eq!(RoundIndex::END.next(), RoundIndex::END);
    }

    #[test]
    fn test_round_display() {
        assert_eq!(format!("{}", RoundIndex::new(0)), "R1 (King)");
        assert_eq!(format!("{}", RoundIndex::new(4)), "R5 (9)");
        assert_eq!(format!("{}", RoundIndex::END), "Game over");
    }

    #[test]
    fn test_round_all() {
        let rounds: Vec<_> = RoundIndex::all().collect();
        assert_eq!(rounds.len(), ROUND_COUNT);
        assert_eq!(rounds[12], RoundIndex::new(12));
    }

    #[test]
    fn test_round_index_as_json_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(RoundIndex::new(2), 7u32);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2":7}"#);

        let back: std::collections::BTreeMap<RoundIndex, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
