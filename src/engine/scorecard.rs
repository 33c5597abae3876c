//! The scorecard state machine.
//!
//! `Scorecard` owns the roster, ledger, round pointer and pending input and
//! is the only thing that mutates them. Every command runs to completion
//! and then writes each record it changed to the injected store, one `set`
//! per record.
//!
//! ## Lifecycle
//!
//! ```text
//! Setup --commit--> InProgress --commit x12--> Complete
//!   ^                                             |
//!   +------------------ reset (confirmed) --------+
//! ```
//!
//! ## Example
//!
//! ```
//! use dutch_scorecard::engine::Scorecard;
//! use dutch_scorecard::storage::MemoryStore;
//!
//! let mut card = Scorecard::load(MemoryStore::new(), Default::default()).with_seed(1);
//! let alice = card.add_player("Alice").unwrap();
//! let bob = card.add_player("Bob").unwrap();
//!
//! card.set_pending_score(&alice, "5");
//! card.set_pending_score(&bob, "3");
//! card.commit_round().unwrap();
//!
//! assert_eq!(card.total_score(&alice), 5);
//! assert_eq!(card.current_round().index(), 1);
//! assert!(!card.is_game_over());
//! ```

use serde::{Deserialize, Serialize};

use super::outcome::{GamePhase, Standing, Winners};
use crate::core::{
    IdGenerator, Joker, Player, PlayerId, RoundIndex, Roster, ScorecardConfig, ScorecardError,
};
use crate::ledger::PendingInput;
use crate::storage::{KeyValueStore, Record, Snapshot};

/// An action awaiting explicit confirmation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PendingAction {
    #[default]
    None,
    /// Clear every player and score.
    Reset,
}

impl PendingAction {
    /// Prompt text for the confirmation dialog.
    #[must_use]
    pub const fn message(self) -> Option<&'static str> {
        match self {
            PendingAction::None => None,
            PendingAction::Reset => Some(
                "Are you sure you want to reset the game? This will clear all players and scores.",
            ),
        }
    }
}

/// Scorecard engine over a key/value store.
pub struct Scorecard<S: KeyValueStore> {
    config: ScorecardConfig,
    store: S,
    ids: IdGenerator,
    state: Snapshot,
    pending_action: PendingAction,
}

impl<S: KeyValueStore> Scorecard<S> {
    /// Start a scorecard, restoring whatever `store` holds.
    ///
    /// Unusable stored data is discarded: the corrupt records are removed
    /// and the scorecard starts empty. A round pointer moved forward by
    /// reconciliation is written back together with the pending input.
    pub fn load(mut store: S, config: ScorecardConfig) -> Self {
        let stored_round = store.get(&config.key(Record::CurrentRound.name()));
        let state = match Snapshot::load(&store, &config) {
            Ok(state) => {
                if !state.is_blank() {
                    tracing::info!(
                        players = state.roster().len(),
                        round = state.current_round().index(),
                        "restored scorecard"
                    );
                }
                state
            }
            Err(err) => {
                tracing::warn!(error = %err, "stored scorecard unusable, starting fresh");
                remove_records(&mut store, &config);
                Snapshot::new()
            }
        };

        let restored_round = state.current_round().index().to_string();
        let round_is_stale =
            !state.is_blank() && stored_round.as_deref().map(str::trim) != Some(restored_round.as_str());

        let mut card = Self {
            config,
            store,
            ids: IdGenerator::from_entropy(),
            state,
            pending_action: PendingAction::None,
        };
        if round_is_stale {
            card.persist(&[Record::CurrentRound, Record::CurrentRoundScores]);
        }
        card
    }

    /// Use a seeded id generator.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ids = IdGenerator::new(seed);
        self
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ScorecardConfig {
        &self.config
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give up the engine and return its store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    // === Commands ===

    /// Add a player by free-text name.
    ///
    /// The name is trimmed; a blank name is ignored and `None` returned.
    /// Duplicate names are allowed.
    pub fn add_player(&mut self, name: &str) -> Option<PlayerId> {
        let Some(name) = crate::core::player::normalize_name(name) else {
            tracing::debug!("ignoring blank player name");
            return None;
        };
        Some(self.push_player(name.to_string()))
    }

    /// Add a player from the quick-add list.
    ///
    /// The trimmed name must be one of the configured presets and must not
    /// already be on the roster (exact match); otherwise returns `None`.
    pub fn add_preset_player(&mut self, name: &str) -> Option<PlayerId> {
        let name = crate::core::player::normalize_name(name)?;
        if !self.config.is_preset(name) {
            tracing::debug!(name, "not a preset player");
            return None;
        }
        if self.is_preset_taken(name) {
            tracing::debug!(name, "preset player already on roster");
            return None;
        }
        Some(self.push_player(name.to_string()))
    }

    fn push_player(&mut self, name: String) -> PlayerId {
        let roster = &self.state.roster;
        let id = self.ids.next_id(|candidate| roster.contains(candidate));

        tracing::debug!(%id, name = %name, "adding player");
        self.state.roster.push(Player::new(id.clone(), name));
        self.state.ledger.ensure_player(&id);
        self.state.pending.ensure_player(&id);

        self.persist(&[Record::Players, Record::Scores, Record::CurrentRoundScores]);
        id
    }

    /// Update a player's pending score text.
    ///
    /// Accepts the empty string or ASCII digits. Anything else, or an
    /// unknown player, is ignored and returns false.
    pub fn set_pending_score(&mut self, player: &PlayerId, raw: &str) -> bool {
        self.try_set_pending_score(player, raw).unwrap_or(false)
    }

    /// Like [`Scorecard::set_pending_score`], but reports unknown players.
    pub fn try_set_pending_score(&mut self, player: &PlayerId, raw: &str) -> Result<bool, ScorecardError> {
        if !self.state.roster.contains(player) {
            return Err(ScorecardError::UnknownPlayer(player.clone()));
        }
        if !self.state.pending.set(player, raw) {
            return Ok(false);
        }
        self.persist(&[Record::CurrentRoundScores]);
        Ok(true)
    }

    /// Validate every pending score and commit the round.
    ///
    /// All-or-nothing: on error nothing changes. On success returns the
    /// round that was committed.
    pub fn commit_round(&mut self) -> Result<RoundIndex, ScorecardError> {
        let round = self.state.round;
        if !round.is_playable() {
            return Err(ScorecardError::GameAlreadyOver);
        }
        if self.state.roster.is_empty() {
            return Err(ScorecardError::NoPlayers);
        }

        let scores = self
            .state
            .pending
            .parse_all(self.state.roster.ids())
            .map_err(|players| {
                tracing::debug!(missing = players.len(), "round incomplete");
                ScorecardError::IncompleteRound { players }
            })?;

        for (player, score) in &scores {
            self.state.ledger.record(player, round, *score);
        }
        self.state.round = round.next();
        self.state.pending.reset_for(self.state.roster.ids());

        tracing::info!(round = %round, "round committed");
        if self.is_game_over() {
            tracing::info!(winners = %self.winners(), "game complete");
        }

        self.persist(&[Record::Scores, Record::CurrentRound, Record::CurrentRoundScores]);
        Ok(round)
    }

    /// Ask to reset the game. Nothing is cleared until [`Scorecard::confirm`].
    pub fn request_reset(&mut self) -> PendingAction {
        self.pending_action = PendingAction::Reset;
        self.pending_action
    }

    /// Carry out the pending action, returning which one ran.
    pub fn confirm(&mut self) -> Result<PendingAction, ScorecardError> {
        match std::mem::take(&mut self.pending_action) {
            PendingAction::None => Err(ScorecardError::NothingToConfirm),
            PendingAction::Reset => {
                self.reset();
                Ok(PendingAction::Reset)
            }
        }
    }

    /// Drop the pending action. Returns false if there was none.
    pub fn cancel(&mut self) -> bool {
        std::mem::take(&mut self.pending_action) != PendingAction::None
    }

    fn reset(&mut self) {
        tracing::info!(players = self.state.roster.len(), "resetting scorecard");
        self.state = Snapshot::new();
        remove_records(&mut self.store, &self.config);
    }

    // === Queries ===

    /// The action awaiting confirmation.
    #[must_use]
    pub fn pending_action(&self) -> PendingAction {
        self.pending_action
    }

    /// Players in roster order.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.state.roster
    }

    /// The round being played, or [`RoundIndex::END`] once the game is over.
    #[must_use]
    pub fn current_round(&self) -> RoundIndex {
        self.state.round
    }

    /// 1-based number of the round being played, for display.
    #[must_use]
    pub fn round_number(&self) -> usize {
        self.state.round.number()
    }

    /// Joker of the round being played.
    #[must_use]
    pub fn current_joker(&self) -> Option<Joker> {
        self.state.round.joker()
    }

    /// True while the 13th round is being played.
    #[must_use]
    pub fn is_final_round(&self) -> bool {
        self.state.round.is_final()
    }

    /// True once all rounds are committed.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        !self.state.round.is_playable()
    }

    /// Current phase of the game.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        if self.is_game_over() {
            GamePhase::Complete
        } else if self.state.round == RoundIndex::FIRST {
            GamePhase::Setup
        } else {
            GamePhase::InProgress
        }
    }

    /// Committed score for one player and round.
    #[must_use]
    pub fn score(&self, player: &PlayerId, round: RoundIndex) -> Option<u32> {
        self.state.ledger.score(player, round)
    }

    /// Sum of a player's committed scores.
    #[must_use]
    pub fn total_score(&self, player: &PlayerId) -> u64 {
        self.state.ledger.total(player)
    }

    /// Pending score text for a player.
    #[must_use]
    pub fn pending_score(&self, player: &PlayerId) -> &str {
        self.state.pending.get(player)
    }

    /// All pending input.
    #[must_use]
    pub fn pending_scores(&self) -> &PendingInput {
        &self.state.pending
    }

    /// Lowest-total players once the game is over; empty before that.
    #[must_use]
    pub fn winners(&self) -> Winners {
        if !self.is_game_over() {
            return Winners::none();
        }
        Winners::compute(&self.state.roster, &self.state.ledger)
    }

    /// True when the game is over and has at least one winner.
    #[must_use]
    pub fn celebrate(&self) -> bool {
        self.is_game_over() && !self.state.roster.is_empty()
    }

    /// Scoreboard rows in roster order.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        let winning_total = if self.is_game_over() {
            self.state.roster.ids().map(|id| self.total_score(id)).min()
        } else {
            None
        };

        self.state
            .roster
            .iter()
            .map(|player| Standing::new(player, &self.state.ledger, winning_total))
            .collect()
    }

    /// True if a quick-add name is already on the roster.
    #[must_use]
    pub fn is_preset_taken(&self, name: &str) -> bool {
        self.state.roster.contains_name(name)
    }

    /// Cheap copy of the full state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.clone()
    }

    // === Persistence ===

    fn persist(&mut self, records: &[Record]) {
        for &record in records {
            if let Err(err) = self.state.save_record(&mut self.store, &self.config, record) {
                tracing::warn!(error = %err, "failed to persist scorecard");
            }
        }
    }
}

fn remove_records<S: KeyValueStore>(store: &mut S, config: &ScorecardConfig) {
    for record in Record::ALL {
        if let Err(err) = store.remove(&config.key(record.name())) {
            tracing::warn!(%record, error = %err, "failed to remove stored record");
        }
    }
}
