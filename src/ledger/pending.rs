//! In-progress scores for the current round.
//!
//! Score entry is a two-stage pipeline:
//!
//! 1. **Capture**: every keystroke's text is checked with [`is_score_text`]
//!    (empty, or ASCII digits only). Accepted text is stored verbatim;
//!    anything else is dropped and the previous text is kept.
//! 2. **Parse**: only at commit time is each player's text turned into a
//!    number with [`parse_score`]. Empty text or a number that does not fit
//!    in `u32` fails the whole commit.
//!
//! Nothing in the capture stage can corrupt the committed ledger.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// True if `raw` may be stored as pending text.
///
/// ```
/// use dutch_scorecard::ledger::is_score_text;
///
/// assert!(is_score_text(""));
/// assert!(is_score_text("042"));
/// assert!(!is_score_text("-3"));
/// assert!(!is_score_text("4a"));
/// assert!(!is_score_text(" 4"));
/// ```
#[must_use]
pub fn is_score_text(raw: &str) -> bool {
    raw.bytes().all(|b| b.is_ascii_digit())
}

/// Parse committed-ready pending text.
///
/// ```
/// use dutch_scorecard::ledger::parse_score;
///
/// assert_eq!(parse_score("17"), Some(17));
/// assert_eq!(parse_score("007"), Some(7));
/// assert_eq!(parse_score(""), None);
/// assert_eq!(parse_score("+1"), None);
/// assert_eq!(parse_score("99999999999"), None);
/// ```
#[must_use]
pub fn parse_score(raw: &str) -> Option<u32> {
    if raw.is_empty() || !is_score_text(raw) {
        return None;
    }
    raw.parse().ok()
}

/// Pending score text per player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PendingInput {
    entries: FxHashMap<PlayerId, String>,
}

impl PendingInput {
    /// Create an empty set of inputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty entry for `player` if none exists.
    pub fn ensure_player(&mut self, player: &PlayerId) {
        self.entries.entry(player.clone()).or_default();
    }

    /// Store `raw` for `player` if it passes [`is_score_text`].
    ///
    /// Returns false, leaving the previous text in place, if it does not.
    pub fn set(&mut self, player: &PlayerId, raw: &str) -> bool {
        if !is_score_text(raw) {
            return false;
        }
        self.entries.insert(player.clone(), raw.to_string());
        true
    }

    /// Pending text for `player`, empty if none.
    #[must_use]
    pub fn get(&self, player: &PlayerId) -> &str {
        self.entries.get(player).map_or("", String::as_str)
    }

    /// Parse every listed player's text.
    ///
    /// Returns the scores in the order given, or every player whose text
    /// did not parse.
    pub fn parse_all<'a>(
        &self,
        players: impl IntoIterator<Item = &'a PlayerId>,
    ) -> Result<Vec<(PlayerId, u32)>, Vec<PlayerId>> {
        let mut scores = Vec::new();
        let mut missing = Vec::new();

        for player in players {
            match parse_score(self.get(player)) {
                Some(score) => scores.push((player.clone(), score)),
                None => missing.push(player.clone()),
            }
        }

        if missing.is_empty() {
            Ok(scores)
        } else {
            Err(missing)
        }
    }

    /// Replace all entries with empty text for the listed players.
    pub fn reset_for<'a>(&mut self, players: impl IntoIterator<Item = &'a PlayerId>) {
        self.entries = players
            .into_iter()
            .map(|player| (player.clone(), String::new()))
            .collect();
    }

    /// First entry whose text is not valid pending text.
    #[must_use]
    pub fn first_invalid(&self) -> Option<(&PlayerId, &str)> {
        self.entries
            .iter()
            .find(|(_, text)| !is_score_text(text))
            .map(|(player, text)| (player, text.as_str()))
    }

    /// Drop entries whose player does not satisfy `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&PlayerId) -> bool) {
        self.entries.retain(|player, _| keep(player));
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> PlayerId {
        PlayerId::new(s)
    }

    #[test]
    fn test_capture_rejects_non_digits() {
        let mut pending = PendingInput::new();
        assert!(pending.set(&id("a"), "12"));
        assert!(!pending.set(&id("a"), "12x"));
        assert_eq!(pending.get(&id("a")), "12");

        assert!(pending.set(&id("a"), ""));
        assert_eq!(pending.get(&id("a")), "");
    }

    #[test]
    fn test_capture_rejects_unicode_digits() {
        let mut pending = PendingInput::new();
        assert!(!pending.set(&id("a"), "٣"));
        assert_eq!(pending.get(&id("a")), "");
    }

    #[test]
    fn test_parse_all_success_in_order() {
        let mut pending = PendingInput::new();
        pending.set(&id("b"), "3");
        pending.set(&id("a"), "5");

        let players = [id("a"), id("b")];
        let scores = pending.parse_all(&players).unwrap();
        assert_eq!(scores, vec![(id("a"), 5), (id("b"), 3)]);
    }

    #[test]
    fn test_parse_all_reports_every_missing_player() {
        let mut pending = PendingInput::new();
        pending.ensure_player(&id("a"));
        pending.set(&id("b"), "4");

        let players = [id("a"), id("b"), id("c")];
        let missing = pending.parse_all(&players).unwrap_err();
        assert_eq!(missing, vec![id("a"), id("c")]);
    }

    #[test]
    fn test_parse_all_overflow_is_missing() {
        let mut pending = PendingInput::new();
        pending.set(&id("a"), "4294967296");

        let missing = pending.parse_all(&[id("a")]).unwrap_err();
        assert_eq!(missing, vec![id("a")]);
    }

    #[test]
    fn test_reset_for() {
        let mut pending = PendingInput::new();
        pending.set(&id("a"), "9");
        pending.set(&id("ghost"), "1");

        pending.reset_for(&[id("a"), id("b")]);
        assert_eq!(pending.len(), 2);
        assert_eq!(pending.get(&id("a")), "");
        assert_eq!(pending.get(&id("b")), "");
        assert_eq!(pending.get(&id("ghost")), "");
    }

    #[test]
    fn test_first_invalid() {
        let pending: PendingInput = serde_json::from_str(r#"{"a":"1","b":"x"}"#).unwrap();
        assert_eq!(pending.first_invalid(), Some((&id("b"), "x")));
    }
}
