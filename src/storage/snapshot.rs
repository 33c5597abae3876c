//! The scorecard's persisted state and its rehydration rules.
//!
//! A [`Snapshot`] bundles the four persisted structures: roster, ledger,
//! round pointer and pending input. The engine owns one, and a clone of it
//! is what a renderer receives.
//!
//! ## Rehydration
//!
//! [`Snapshot::decode`] turns the four raw records into a snapshot:
//!
//! 1. Absent records mean "no data" for that structure.
//! 2. Any record that fails to parse or validate fails the whole load;
//!    the caller falls back to an empty game. Nothing is applied partially.
//! 3. Ledger and pending entries for players not on the roster are dropped.
//!    Roster players without entries get empty ones.
//! 4. The round pointer is never behind the ledger: it becomes
//!    `max(stored, highest committed round + 1)`, an absent record
//!    counting as round 0.
//! 5. Pending input survives only if the stored round was used as-is;
//!    otherwise it belonged to a round that is already committed.

use serde::Serialize;

use super::{KeyValueStore, Record, StoreError};
use crate::core::{PlayerId, RoundIndex, Roster, ScorecardConfig, ROUND_COUNT};
use crate::ledger::{is_score_text, Ledger, PendingInput};

/// Errors found while decoding persisted records.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// A JSON record did not parse into the expected shape.
    #[error("record {record} is malformed: {source}")]
    Json {
        record: Record,
        #[source]
        source: serde_json::Error,
    },

    /// The round record is not a decimal integer.
    #[error("current round {0:?} is not a number")]
    InvalidRound(String),

    /// The round record is past the end of the game.
    #[error("current round {0} is out of range")]
    RoundOutOfRange(u64),

    /// The ledger holds a score for a round that does not exist.
    #[error("player {player} has a score for nonexistent round {round}")]
    LedgerRoundOutOfRange { player: PlayerId, round: u8 },

    /// A pending entry holds text that could never have been typed.
    #[error("pending score {value:?} for player {player} is not digits")]
    InvalidPending { player: PlayerId, value: String },

    /// Two roster entries share an id.
    #[error("player id {0} appears twice")]
    DuplicatePlayer(PlayerId),

    /// A roster entry has a blank name.
    #[error("player {0} has an empty name")]
    EmptyName(PlayerId),

    /// A record could not be written.
    #[error("failed to write record {record}: {source}")]
    Store {
        record: Record,
        #[source]
        source: StoreError,
    },
}

/// Roster, ledger, round pointer and pending input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub(crate) roster: Roster,
    pub(crate) ledger: Ledger,
    pub(crate) round: RoundIndex,
    pub(crate) pending: PendingInput,
}

impl Snapshot {
    /// An empty game in the setup phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Players in roster order.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Committed scores.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The round currently being played, or [`RoundIndex::END`].
    #[must_use]
    pub fn current_round(&self) -> RoundIndex {
        self.round
    }

    /// Uncommitted score text.
    #[must_use]
    pub fn pending(&self) -> &PendingInput {
        &self.pending
    }

    /// True when nothing at all has been recorded.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.roster.is_empty() && self.ledger.is_empty() && self.round == RoundIndex::FIRST
    }

    /// Encode one record as stored text.
    pub fn encode(&self, record: Record) -> Result<String, SnapshotError> {
        fn json<T: Serialize>(record: Record, value: &T) -> Result<String, SnapshotError> {
            serde_json::to_string(value).map_err(|source| SnapshotError::Json { record, source })
        }

        match record {
            Record::Players => json(record, &self.roster),
            Record::Scores => json(record, &self.ledger),
            Record::CurrentRound => Ok(self.round.index().to_string()),
            Record::CurrentRoundScores => json(record, &self.pending),
        }
    }

    /// Write one record to `store`.
    pub fn save_record<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        config: &ScorecardConfig,
        record: Record,
    ) -> Result<(), SnapshotError> {
        let text = self.encode(record)?;
        store
            .set(&config.key(record.name()), &text)
            .map_err(|source| SnapshotError::Store { record, source })
    }

    /// Write every record to `store`.
    pub fn save<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        config: &ScorecardConfig,
    ) -> Result<(), SnapshotError> {
        for record in Record::ALL {
            self.save_record(store, config, record)?;
        }
        Ok(())
    }

    /// Read and decode the records under `config`'s namespace.
    pub fn load<S: KeyValueStore + ?Sized>(
        store: &S,
        config: &ScorecardConfig,
    ) -> Result<Self, SnapshotError> {
        let [players, scores, round, pending] =
            Record::ALL.map(|record| store.get(&config.key(record.name())));

        Self::decode(
            players.as_deref(),
            scores.as_deref(),
            round.as_deref(),
            pending.as_deref(),
        )
    }

    /// Decode raw record text. See the module docs for the rules.
    ///
    /// ```
    /// use dutch_scorecard::core::RoundIndex;
    /// use dutch_scorecard::storage::Snapshot;
    ///
    /// let snapshot = Snapshot::decode(
    ///     Some(r#"[{"id":"a","name":"Alice"}]"#),
    ///     Some(r#"{"a":{"0":5}}"#),
    ///     Some("0"),
    ///     Some(r#"{"a":"5"}"#),
    /// )
    /// .unwrap();
    ///
    /// // The ledger already holds round 0, so the pointer moves past it.
    /// assert_eq!(snapshot.current_round(), RoundIndex::new(1));
    /// assert_eq!(snapshot.pending().get(&"a".into()), "");
    /// ```
    pub fn decode(
        players: Option<&str>,
        scores: Option<&str>,
        round: Option<&str>,
        pending: Option<&str>,
    ) -> Result<Self, SnapshotError> {
        let roster: Roster = parse_json(Record::Players, players)?.unwrap_or_default();
        let mut ledger: Ledger = parse_json(Record::Scores, scores)?.unwrap_or_default();
        let mut pending: PendingInput =
            parse_json(Record::CurrentRoundScores, pending)?.unwrap_or_default();
        let stored_round = round.map(parse_round).transpose()?;

        validate_roster(&roster)?;
        validate_ledger(&ledger)?;
        if let Some((player, value)) = pending.first_invalid() {
            return Err(SnapshotError::InvalidPending {
                player: player.clone(),
                value: value.to_string(),
            });
        }

        let orphans = ledger.retain(|player| roster.contains(player));
        if orphans > 0 {
            tracing::debug!(orphans, "dropped ledger rows for unknown players");
        }
        pending.retain(|player| roster.contains(player));

        let committed = ledger.highest_round().map_or(RoundIndex::FIRST, RoundIndex::next);
        let stored = stored_round.unwrap_or(RoundIndex::FIRST);
        let restored = stored.max(committed);

        if restored != stored {
            tracing::info!(
                stored = stored.index(),
                restored = restored.index(),
                "round pointer behind ledger, advancing"
            );
            pending.clear();
        }

        for player in roster.ids() {
            ledger.ensure_player(player);
            pending.ensure_player(player);
        }

        Ok(Self {
            roster,
            ledger,
            round: restored,
            pending,
        })
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(
    record: Record,
    text: Option<&str>,
) -> Result<Option<T>, SnapshotError> {
    text.map(|text| serde_json::from_str(text))
        .transpose()
        .map_err(|source| SnapshotError::Json { record, source })
}

fn parse_round(text: &str) -> Result<RoundIndex, SnapshotError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !is_score_text(trimmed) {
        return Err(SnapshotError::InvalidRound(text.to_string()));
    }
    let value: u64 = trimmed
        .parse()
        .map_err(|_| SnapshotError::InvalidRound(text.to_string()))?;
    if value > ROUND_COUNT as u64 {
        return Err(SnapshotError::RoundOutOfRange(value));
    }
    Ok(RoundIndex::new(value as u8))
}

fn validate_roster(roster: &Roster) -> Result<(), SnapshotError> {
    let mut seen = rustc_hash::FxHashSet::default();
    for player in roster.iter() {
        if !seen.insert(&player.id) {
            return Err(SnapshotError::DuplicatePlayer(player.id.clone()));
        }
        if player.name.trim().is_empty() {
            return Err(SnapshotError::EmptyName(player.id.clone()));
        }
    }
    Ok(())
}

fn validate_ledger(ledger: &Ledger) -> Result<(), SnapshotError> {
    for (player, row) in ledger.iter() {
        if let Some(round) = row.highest_round().filter(|r| !r.is_playable()) {
            return Err(SnapshotError::LedgerRoundOutOfRange {
                player: player.clone(),
                round: round.0,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Player;
    use crate::storage::MemoryStore;

    const PLAYERS: &str = r#"[{"id":"a","name":"Alice"},{"id":"b","name":"Bob"}]"#;

    fn id(s: &str) -> PlayerId {
        PlayerId::new(s)
    }

    #[test]
    fn test_decode_nothing_is_empty() {
        let snapshot = Snapshot::decode(None, None, None, None).unwrap();
        assert_eq!(snapshot, Snapshot::new());
        assert!(snapshot.is_blank());
    }

    #[test]
    fn test_decode_consistent_state() {
        let snapshot = Snapshot::decode(
            Some(PLAYERS),
            Some(r#"{"a":{"0":5,"1":2},"b":{"0":3,"1":9}}"#),
            Some("2"),
            Some(r#"{"a":"4","b":""}"#),
        )
        .unwrap();

        assert_eq!(snapshot.roster().len(), 2);
        assert_eq!(snapshot.current_round(), RoundIndex::new(2));
        assert_eq!(snapshot.ledger().total(&id("b")), 12);
        assert_eq!(snapshot.pending().get(&id("a")), "4");
    }

    #[test]
    fn test_round_ahead_of_ledger_is_kept() {
        let snapshot = Snapshot::decode(Some(PLAYERS), Some(r#"{"a":{"0":1}}"#), Some("5"), None).unwrap();
        assert_eq!(snapshot.current_round(), RoundIndex::new(5));
    }

    #[test]
    fn test_missing_round_uses_ledger() {
        let snapshot = Snapshot::decode(
            Some(PLAYERS),
            Some(r#"{"a":{"0":1,"1":1,"2":1}}"#),
            None,
            Some(r#"{"a":"7"}"#),
        )
        .unwrap();
        assert_eq!(snapshot.current_round(), RoundIndex::new(3));
        assert_eq!(snapshot.pending().get(&id("a")), "");
    }

    #[test]
    fn test_missing_round_keeps_pending_before_first_commit() {
        let snapshot = Snapshot::decode(Some(PLAYERS), None, None, Some(r#"{"a":"7"}"#)).unwrap();
        assert_eq!(snapshot.current_round(), RoundIndex::FIRST);
        assert_eq!(snapshot.pending().get(&id("a")), "7");
    }

    #[test]
    fn test_roster_players_get_empty_entries() {
        let snapshot = Snapshot::decode(Some(PLAYERS), None, Some("0"), None).unwrap();
        assert!(snapshot.ledger().contains(&id("a")));
        assert!(snapshot.ledger().contains(&id("b")));
        assert_eq!(snapshot.pending().len(), 2);
    }

    #[test]
    fn test_orphans_dropped() {
        let snapshot = Snapshot::decode(
            Some(PLAYERS),
            Some(r#"{"ghost":{"0":1,"1":1}}"#),
            Some("0"),
            Some(r#"{"ghost":"3"}"#),
        )
        .unwrap();
        assert!(!snapshot.ledger().contains(&id("ghost")));
        assert_eq!(snapshot.pending().get(&id("ghost")), "");
        assert_eq!(snapshot.current_round(), RoundIndex::FIRST);
    }

    #[test]
    fn test_malformed_records_fail() {
        assert!(matches!(
            Snapshot::decode(Some("{not json"), None, None, None),
            Err(SnapshotError::Json { record: Record::Players, .. })
        ));
        assert!(matches!(
            Snapshot::decode(None, Some(r#"{"a":{"0":-1}}"#), None, None),
            Err(SnapshotError::Json { record: Record::Scores, .. })
        ));
        assert!(matches!(
            Snapshot::decode(None, None, Some("three"), None),
            Err(SnapshotError::InvalidRound(_))
        ));
        assert!(matches!(
            Snapshot::decode(None, None, Some("-1"), None),
            Err(SnapshotError::InvalidRound(_))
        ));
        assert!(matches!(
            Snapshot::decode(None, None, Some("14"), None),
            Err(SnapshotError::RoundOutOfRange(14))
        ));
        assert!(matches!(
            Snapshot::decode(None, Some(r#"{"a":{"13":1}}"#), None, None),
            Err(SnapshotError::LedgerRoundOutOfRange { round: 13, .. })
        ));
        assert!(matches!(
            Snapshot::decode(None, None, None, Some(r#"{"a":"1.5"}"#)),
            Err(SnapshotError::InvalidPending { .. })
        ));
    }

    #[test]
    fn test_invalid_roster_fails() {
        assert!(matches!(
            Snapshot::decode(Some(r#"[{"id":"a","name":"A"},{"id":"a","name":"B"}]"#), None, None, None),
            Err(SnapshotError::DuplicatePlayer(_))
        ));
        assert!(matches!(
            Snapshot::decode(Some(r#"[{"id":"a","name":"  "}]"#), None, None, None),
            Err(SnapshotError::EmptyName(_))
        ));
    }

    #[test]
    fn test_round_text_allows_surrounding_whitespace() {
        let snapshot = Snapshot::decode(None, None, Some(" 13\n"), None).unwrap();
        assert_eq!(snapshot.current_round(), RoundIndex::END);
    }

    #[test]
    fn test_save_then_load() {
        let mut snapshot = Snapshot::new();
        snapshot.roster.push(Player::new(id("a"), "Alice"));
        snapshot.ledger.record(&id("a"), RoundIndex::new(0), 6);
        snapshot.round = RoundIndex::new(1);
        snapshot.pending.set(&id("a"), "12");

        let config = ScorecardConfig::default();
        let mut store = MemoryStore::new();
        snapshot.save(&mut store, &config).unwrap();

        assert_eq!(store.get("dutch_currentRound").as_deref(), Some("1"));
        assert_eq!(Snapshot::load(&store, &config).unwrap(), snapshot);
    }

    #[test]
    fn test_load_respects_namespace() {
        let config = ScorecardConfig::default();
        let other = ScorecardConfig::new().with_namespace("other_");

        let mut snapshot = Snapshot::new();
        snapshot.round = RoundIndex::new(4);
        let mut store = MemoryStore::new();
        snapshot.save(&mut store, &config).unwrap();

        assert_eq!(Snapshot::load(&store, &other).unwrap(), Snapshot::new());
    }
}
