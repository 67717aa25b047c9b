//! Parade rule engine.
//!
//! `ParadeRules` holds the rule parameters and implements every transition
//! of the game state machine:
//! - Lobby: `join`
//! - Deal: `start_game`
//! - Play resolution: `play`
//! - Terminal checks: `is_game_over`, `result`
//!
//! ## Play commit
//!
//! A play is resolved on a clone of the state (O(1) thanks to `im`). The
//! clone is validated by recomputing the removal rule and recounting every
//! card; only then does it replace the caller's state. A failed validation
//! is a `ConsistencyFault` and leaves the caller's state untouched.

use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::removal::{apply_removal, compute_removal, verify_removal};
use super::scoring::{compute_scores, FinalScores, GameResult};
use crate::cards::{generate_deck, Card};
use crate::core::{GameState, ParadeConfig, PlayRecord, PlayerId, DEFAULT_TERMINAL_HAND_SIZE};
use crate::error::{ConsistencyFault, JoinError, StartError};

/// Why a play was ignored. The state is unchanged in every case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlayRejection {
    #[error("no players are seated")]
    NoPlayers,
    #[error("the game has not started")]
    NotStarted,
    #[error("the game is over")]
    GameOver,
    #[error("it is not this player's turn")]
    OutOfTurn,
    #[error("hand index out of range")]
    InvalidHandIndex,
}

/// What a committed play did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayReport {
    /// Who played.
    pub player: PlayerId,
    /// The card added to the row.
    pub card: Card,
    /// Cards taken from the row, oldest first.
    pub collected: SmallVec<[Card; 4]>,
    /// Replacement drawn from the deck.
    pub drawn: Option<Card>,
    /// This play switched the last round on.
    pub last_round_triggered: bool,
    /// Set when this play ended the game.
    pub final_scores: Option<FinalScores>,
}

impl PlayReport {
    /// Whether this play ended the game.
    #[must_use]
    pub fn ended_game(&self) -> bool {
        self.final_scores.is_some()
    }
}

/// Result of a play request that did not hit an engine bug.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The play was committed.
    Applied(PlayReport),
    /// The play was ignored.
    Ignored(PlayRejection),
}

impl PlayOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, PlayOutcome::Applied(_))
    }

    /// The report of a committed play.
    #[must_use]
    pub fn report(&self) -> Option<&PlayReport> {
        match self {
            PlayOutcome::Applied(report) => Some(report),
            PlayOutcome::Ignored(_) => None,
        }
    }

    /// The rejection of an ignored play.
    #[must_use]
    pub fn rejection(&self) -> Option<PlayRejection> {
        match self {
            PlayOutcome::Applied(_) => None,
            PlayOutcome::Ignored(reason) => Some(*reason),
        }
    }
}

/// Rule parameters plus the transitions of the Parade state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParadeRules {
    terminal_hand_size: usize,
    min_players: usize,
    max_players: usize,
}

impl Default for ParadeRules {
    fn default() -> Self {
        Self {
            terminal_hand_size: DEFAULT_TERMINAL_HAND_SIZE,
            min_players: 2,
            max_players: 6,
        }
    }
}

impl ParadeRules {
    /// Rules with the standard parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules taken from a table configuration.
    #[must_use]
    pub fn from_config(config: &ParadeConfig) -> Self {
        Self {
            terminal_hand_size: config.terminal_hand_size,
            min_players: config.min_players,
            max_players: config.max_players,
        }
    }

    #[must_use]
    pub fn terminal_hand_size(&self) -> usize {
        self.terminal_hand_size
    }

    // === Lobby ===

    /// Seat a player. Names are trimmed and must be unique ignoring case.
    pub fn join(&self, state: &mut GameState, name: &str) -> Result<PlayerId, JoinError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(JoinError::EmptyName);
        }
        if state.is_started() {
            return Err(JoinError::GameAlreadyStarted);
        }
        if state.find_player(name).is_some() {
            return Err(JoinError::DuplicateName(name.to_string()));
        }
        if state.player_count() >= self.max_players {
            return Err(JoinError::TableFull(self.max_players));
        }

        let id = state.seat(name);
        info!(player = %id, name, "player joined");
        Ok(id)
    }

    // === Deal ===

    /// Shuffle a fresh deck and deal.
    ///
    /// Each player in seat order gets `hand_size` cards, then `parade_size`
    /// cards go face up. A short deck deals short without failing. Calling
    /// this on a running game restarts it.
    pub fn start_game(
        &self,
        state: &mut GameState,
        parade_size: usize,
        hand_size: usize,
    ) -> Result<(), StartError> {
        if state.player_count() < self.min_players {
            return Err(StartError::NotEnoughPlayers {
                needed: self.min_players,
                seated: state.player_count(),
            });
        }

        state.deck = generate_deck(&mut state.rng);
        state.parade_row.clear();
        state.history.clear();
        state.last_round = false;
        state.turn = 0;

        for player in state.players.iter_mut() {
            player.clear_piles();
            for _ in 0..hand_size {
                match state.deck.draw() {
                    Some(card) => player.hand.push_back(card),
                    None => break,
                }
            }
        }
        for _ in 0..parade_size {
            match state.deck.draw() {
                Some(card) => state.parade_row.push_back(card),
                None => break,
            }
        }

        state.parade_size = parade_size;
        state.hand_size = hand_size;
        state.started = true;

        info!(
            players = state.player_count(),
            parade_size,
            hand_size,
            deck_left = state.deck.len(),
            "game started"
        );
        Ok(())
    }

    // === Play ===

    /// Why `player` may not play `hand_index` right now, if anything.
    #[must_use]
    pub fn check_play(&self, state: &GameState, player: PlayerId, hand_index: usize) -> Option<PlayRejection> {
        if state.player_count() == 0 {
            return Some(PlayRejection::NoPlayers);
        }
        if !state.is_started() {
            return Some(PlayRejection::NotStarted);
        }
        if self.is_game_over(state) {
            return Some(PlayRejection::GameOver);
        }
        if player.index() != state.turn() {
            return Some(PlayRejection::OutOfTurn);
        }
        match state.player(player) {
            Some(p) if hand_index < p.hand().len() => None,
            _ => Some(PlayRejection::InvalidHandIndex),
        }
    }

    /// Play the card at `hand_index` from `player`'s hand.
    ///
    /// Out-of-turn and out-of-range requests are ignored, not errors. A
    /// `ConsistencyFault` means the engine disagreed with itself; `state`
    /// is left as it was.
    pub fn play(
        &self,
        state: &mut GameState,
        player: PlayerId,
        hand_index: usize,
    ) -> Result<PlayOutcome, ConsistencyFault> {
        if let Some(rejection) = self.check_play(state, player, hand_index) {
            warn!(player = %player, hand_index, %rejection, "play ignored");
            return Ok(PlayOutcome::Ignored(rejection));
        }

        let mut next = state.clone();
        match self.resolve_play(&mut next, player, hand_index) {
            Ok(report) => {
                *state = next;
                Ok(PlayOutcome::Applied(report))
            }
            Err(fault) => {
                error!(player = %player, hand_index, %fault, "play aborted by consistency check");
                Err(fault)
            }
        }
    }

    /// Apply a validated play to `next`.
    fn resolve_play(
        &self,
        next: &mut GameState,
        player: PlayerId,
        hand_index: usize,
    ) -> Result<PlayReport, ConsistencyFault> {
        let total_before = next.card_count();
        let row_before = next.parade_row.clone();
        let sequence = next.history.len() as u32;
        let was_last_round = next.last_round;

        let GameState {
            players,
            deck,
            parade_row,
            last_round,
            ..
        } = &mut *next;
        let actor = &mut players[player.index()];

        let card = actor.hand.remove(hand_index);
        let removal = compute_removal(&row_before, card);
        let row_after = apply_removal(&row_before, card, &removal);
        verify_removal(&row_before, card, &removal, &row_after)?;

        *parade_row = row_after;
        actor.collected.extend(removal.cards().iter().copied());

        let drawn = if was_last_round { None } else { deck.draw() };
        if let Some(card) = drawn {
            actor.hand.push_back(card);
        }

        let last_round_triggered = !was_last_round && (actor.has_all_colors() || deck.is_empty());
        if last_round_triggered {
            *last_round = true;
        }

        next.history
            .push_back(PlayRecord::new(player, card, removal.cards(), drawn, sequence));
        next.advance_turn();

        let total_after = next.card_count();
        if total_after != total_before {
            return Err(ConsistencyFault::CardCountMismatch {
                expected: total_before,
                actual: total_after,
            });
        }

        debug!(
            player = %player,
            card = %card,
            taken = removal.len(),
            row = next.parade_row.len(),
            deck_left = next.deck.len(),
            "play committed"
        );
        if last_round_triggered {
            info!(player = %player, "last round triggered");
        }

        let final_scores = if self.is_game_over(next) {
            let scores = self.final_scores(next);
            info!(?scores, "game over");
            Some(scores)
        } else {
            None
        };

        Ok(PlayReport {
            player,
            card,
            collected: SmallVec::from_slice(removal.cards()),
            drawn,
            last_round_triggered,
            final_scores,
        })
    }

    // === Terminal checks ===

    /// The last round is on and every hand holds exactly the terminal size.
    #[must_use]
    pub fn is_game_over(&self, state: &GameState) -> bool {
        state.is_last_round()
            && state.player_count() > 0
            && state
                .players()
                .iter()
                .all(|p| p.hand().len() == self.terminal_hand_size)
    }

    /// Scores in seat order.
    #[must_use]
    pub fn scores(&self, state: &GameState) -> Vec<i64> {
        compute_scores(state.players().iter())
    }

    /// Scores keyed by name.
    #[must_use]
    pub fn final_scores(&self, state: &GameState) -> FinalScores {
        FinalScores::from_players(state.players().iter())
    }

    /// The result, once the game is over.
    #[must_use]
    pub fn result(&self, state: &GameState) -> Option<GameResult> {
        self.is_game_over(state)
            .then(|| GameResult::from_scores(&self.final_scores(state)))
    }
}
