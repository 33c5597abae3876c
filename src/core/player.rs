//! Player identification and the ordered roster.
//!
//! ## PlayerId
//!
//! Opaque unique identifier, generated once when a player is added and never
//! reused within a game. Stored as text so ids written by older builds of
//! the scorecard (browser UUIDs) load unchanged.
//!
//! ## Roster
//!
//! Insertion-ordered list of players backed by `im::Vector`, so cloning a
//! roster for a rendering snapshot is O(1). Roster order is the display
//! order and the tie order for winners.

use im::Vector;
use serde::{Deserialize, Serialize};

/// Opaque player identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Wrap an existing id string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A player on the scorecard.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Immutable identity.
    pub id: PlayerId,

    /// Display name, trimmed and non-empty.
    pub name: String,
}

impl Player {
    /// Create a player.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Trim a candidate player name, returning `None` if nothing is left.
///
/// ```
/// use dutch_scorecard::core::player::normalize_name;
///
/// assert_eq!(normalize_name("  Alice "), Some("Alice"));
/// assert_eq!(normalize_name("   "), None);
/// ```
#[must_use]
pub fn normalize_name(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Ordered player roster.
///
/// ## Example
///
/// ```
/// use dutch_scorecard::core::{Player, PlayerId, Roster};
///
/// let mut roster = Roster::new();
/// roster.push(Player::new(PlayerId::new("a"), "Alice"));
/// roster.push(Player::new(PlayerId::new("b"), "Bob"));
///
/// assert_eq!(roster.len(), 2);
/// assert_eq!(roster.name_of(&PlayerId::new("b")), Some("Bob"));
/// assert!(roster.contains_name("Alice"));
/// assert!(!roster.contains_name("alice"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vector<Player>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// True if no players have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Append a player at the end of the roster.
    ///
    /// Callers are responsible for id uniqueness.
    pub fn push(&mut self, player: Player) {
        self.players.push_back(player);
    }

    /// Look up a player by id.
    #[must_use]
    pub fn get(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Name of the player with `id`.
    #[must_use]
    pub fn name_of(&self, id: &PlayerId) -> Option<&str> {
        self.get(id).map(|p| p.name.as_str())
    }

    /// True if a player with this id is on the roster.
    #[must_use]
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.get(id).is_some()
    }

    /// Case-sensitive exact name match.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name == name)
    }

    /// Iterate over players in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Iterate over player ids in roster order.
    pub fn ids(&self) -> impl Iterator<Item = &PlayerId> {
        self.players.iter().map(|p| &p.id)
    }
}

impl FromIterator<Player> for Roster {
    fn from_iter<I: IntoIterator<Item = Player>>(iter: I) -> Self {
        Self {
            players: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_of(names: &[&str]) -> Roster {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(PlayerId::new(format!("p{i}")), *name))
            .collect()
    }

    #[test]
    fn test_player_id_basics() {
        let id = PlayerId::new("abc");
        assert_eq!(id.as_str(), "abc");
        assert_eq!(format!("{}", id), "abc");
        assert_eq!(PlayerId::from("abc"), id);
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Bob"), Some("Bob"));
        assert_eq!(normalize_name("\t Bob \n"), Some("Bob"));
        assert_eq!(normalize_name(""), None);
        assert_eq!(normalize_name(" \t "), None);
    }

    #[test]
    fn test_roster_preserves_order() {
        let roster = roster_of(&["Mona", "Amit", "Riya"]);
        let names: Vec<_> = roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Mona", "Amit", "Riya"]);

        let ids: Vec<_> = roster.ids().map(PlayerId::as_str).collect();
        assert_eq!(ids, vec!["p0", "p1", "p2"]);
    }

    #[test]
    fn test_roster_lookup() {
        let roster = roster_of(&["Mona", "Amit"]);
        assert_eq!(roster.name_of(&PlayerId::new("p1")), Some("Amit"));
        assert!(roster.contains(&PlayerId::new("p0")));
        assert!(!roster.contains(&PlayerId::new("p9")));
        assert_eq!(roster.name_of(&PlayerId::new("p9")), None);
    }

    #[test]
    fn test_roster_duplicate_names_allowed() {
        let roster = roster_of(&["Sam", "Sam"]);
        assert_eq!(roster.len(), 2);
        assert!(roster.contains_name("Sam"));
    }

    #[test]
    fn test_roster_serialization() {
        let roster = roster_of(&["Alice", "Bob"]);
        let json = serde_json::to_string(&roster).unwrap();
        assert_eq!(json, r#"[{"id":"p0","name":"Alice"},{"id":"p1","name":"Bob"}]"#);

        let back: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(back, roster);
    }
}
