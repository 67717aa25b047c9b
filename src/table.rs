//! The authoritative table.
//!
//! `Table` is what a transport layer talks to. It owns one game and one
//! leaderboard, each behind its own mutex, and is `Send + Sync` so it can be
//! shared with `Arc`.
//!
//! ## Locking
//!
//! Every mutation holds the game lock for its whole duration, so plays are
//! serialized. Queries take the same lock briefly and return owned copies,
//! which are cheap because the state is built on `im`. When both locks are
//! needed the order is always game, then leaderboard.
//!
//! A play commits by swapping in a validated copy of the state, so a panic
//! can never leave half a play behind. A poisoned lock is therefore
//! recovered rather than propagated.
//!
//! ## Events
//!
//! Each committed mutation appends `GameEvent`s to the table's queue. When a
//! play ends the game the order is `CardPlayed`, `FinalScoresReady`,
//! `LeaderboardUpdated`, `GameEnded`.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use im::Vector;
use tracing::{error, info};

use crate::cards::Card;
use crate::core::{GameRng, GameState, ParadeConfig, PlayRecord, PlayerId};
use crate::error::{ConfigError, ConsistencyFault, JoinError, StartError};
use crate::events::{EventQueue, GameEvent};
use crate::leaderboard::{Leaderboard, RankedEntry};
use crate::rules::{FinalScores, GameResult, ParadeRules, PlayOutcome};
use crate::snapshot::Snapshot;

/// Everything guarded by the game lock.
#[derive(Debug)]
struct GameSlot {
    state: GameState,
    events: EventQueue,
}

/// One Parade table: a game, its event queue and the leaderboard.
#[derive(Debug)]
pub struct Table {
    config: ParadeConfig,
    rules: ParadeRules,
    game: Mutex<GameSlot>,
    leaderboard: Mutex<Leaderboard>,
}

impl Table {
    /// Create a table, loading the leaderboard from the configured file.
    pub fn new(config: ParadeConfig) -> Result<Self, ConfigError> {
        let leaderboard = match &config.leaderboard_path {
            Some(path) => Leaderboard::restore(path),
            None => Leaderboard::new(),
        };
        Self::with_leaderboard(config, leaderboard)
    }

    /// Create a table around an existing leaderboard.
    pub fn with_leaderboard(config: ParadeConfig, leaderboard: Leaderboard) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        info!(seed = rng.seed(), "table created");

        Ok(Self {
            rules: ParadeRules::from_config(&config),
            config,
            game: Mutex::new(GameSlot {
                state: GameState::new(rng),
                events: EventQueue::new(),
            }),
            leaderboard: Mutex::new(leaderboard),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ParadeConfig {
        &self.config
    }

    fn game(&self) -> MutexGuard<'_, GameSlot> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn board(&self) -> MutexGuard<'_, Leaderboard> {
        self.leaderboard.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // === Mutations ===

    /// Seat a player in the lobby.
    pub fn join(&self, name: &str) -> Result<PlayerId, JoinError> {
        let mut game = self.game();
        let id = self.rules.join(&mut game.state, name)?;
        let name = game.state.player(id).map(|p| p.name().to_string()).unwrap_or_default();
        game.events.push(GameEvent::PlayerJoined { player: id, name });
        Ok(id)
    }

    /// Deal a new game. Restarts a running one.
    pub fn start_game(&self, parade_size: usize, hand_size: usize) -> Result<(), StartError> {
        let mut game = self.game();
        let GameSlot { state, events } = &mut *game;
        self.rules.start_game(state, parade_size, hand_size)?;
        events.push(GameEvent::GameStarted {
            player_count: state.player_count(),
        });
        Ok(())
    }

    /// Deal with the configured default sizes.
    pub fn start_default_game(&self) -> Result<(), StartError> {
        self.start_game(self.config.default_parade_size, self.config.default_hand_size)
    }

    /// Play a card. See `ParadeRules::play`.
    ///
    /// A play that ends the game also records the final scores in the
    /// leaderboard and persists it.
    pub fn play(&self, player: PlayerId, hand_index: usize) -> Result<PlayOutcome, ConsistencyFault> {
        let mut game = self.game();
        let GameSlot { state, events } = &mut *game;

        let outcome = self.rules.play(state, player, hand_index)?;
        let PlayOutcome::Applied(report) = &outcome else {
            return Ok(outcome);
        };

        events.push(GameEvent::CardPlayed {
            player: report.player,
            card: report.card,
            collected: report.collected.clone(),
        });
        if report.last_round_triggered {
            events.push(GameEvent::LastRoundTriggered { by: report.player });
        }
        if let Some(scores) = &report.final_scores {
            events.push(GameEvent::FinalScoresReady {
                scores: scores.clone(),
            });
            self.record_into_board(scores);
            events.push(GameEvent::LeaderboardUpdated);
            events.push(GameEvent::GameEnded {
                result: GameResult::from_scores(scores),
            });
        }

        Ok(outcome)
    }

    // === Queries ===

    /// Hand of `player`, in hand order.
    #[must_use]
    pub fn hand_of(&self, player: PlayerId) -> Option<Vector<Card>> {
        self.game().state.player(player).map(|p| p.hand().clone())
    }

    /// Collected pile of `player`, in collection order.
    #[must_use]
    pub fn collected_of(&self, player: PlayerId) -> Option<Vector<Card>> {
        self.game().state.player(player).map(|p| p.collected().clone())
    }

    /// Collected piles in seat order.
    #[must_use]
    pub fn collected_of_all(&self) -> Vec<Vector<Card>> {
        self.game()
            .state
            .players()
            .iter()
            .map(|p| p.collected().clone())
            .collect()
    }

    /// The parade row, oldest first.
    #[must_use]
    pub fn parade_row(&self) -> Vector<Card> {
        self.game().state.parade_row().clone()
    }

    /// Seat of the player to act, once the game has started.
    #[must_use]
    pub fn current_turn(&self) -> Option<PlayerId> {
        let game = self.game();
        if !game.state.is_started() {
            return None;
        }
        game.state.current_player().map(|p| p.id())
    }

    /// Name of the player to act, once the game has started.
    #[must_use]
    pub fn current_turn_name(&self) -> Option<String> {
        let game = self.game();
        if !game.state.is_started() {
            return None;
        }
        game.state.current_player().map(|p| p.name().to_string())
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.game().state.is_started()
    }

    #[must_use]
    pub fn is_last_round(&self) -> bool {
        self.game().state.is_last_round()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.rules.is_game_over(&self.game().state)
    }

    /// Live scores in seat order.
    #[must_use]
    pub fn scores(&self) -> Vec<i64> {
        self.rules.scores(&self.game().state)
    }

    /// Live scores keyed by name.
    #[must_use]
    pub fn final_scores(&self) -> FinalScores {
        self.rules.final_scores(&self.game().state)
    }

    /// The result, once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.rules.result(&self.game().state)
    }

    #[must_use]
    pub fn player_names(&self) -> Vec<String> {
        self.game().state.player_names()
    }

    /// Seat of the player called `name`, ignoring case.
    #[must_use]
    pub fn player_id_of(&self, name: &str) -> Option<PlayerId> {
        self.game().state.find_player(name).map(|p| p.id())
    }

    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.game().state.deck().len()
    }

    /// Plays committed since the last deal.
    #[must_use]
    pub fn history(&self) -> Vector<PlayRecord> {
        self.game().state.history().clone()
    }

    /// Capture the current game.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.game().state)
    }

    // === Snapshots ===

    /// Save the game to `path`. Returns `false` on failure.
    pub fn save(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let mut game = self.game();

        match Snapshot::capture(&game.state).save(path) {
            Ok(()) => {
                info!(path = %path.display(), "game saved");
                game.events
                    .push(GameEvent::InfoMessage(format!("Game saved to {}", path.display())));
                true
            }
            Err(err) => {
                error!(path = %path.display(), %err, "game save failed");
                false
            }
        }
    }

    /// Replace the game with the one saved at `path`.
    ///
    /// Returns `false` and keeps the current game if the file is missing,
    /// unreadable or fails validation.
    pub fn load(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let restored = Snapshot::load(path).and_then(Snapshot::into_state);

        let mut game = self.game();
        match restored {
            Ok(state) => {
                let player_count = state.player_count();
                game.state = state;
                game.events.push(GameEvent::GameStarted { player_count });
                info!(path = %path.display(), players = player_count, "game loaded");
                true
            }
            Err(err) => {
                error!(path = %path.display(), %err, "game load failed");
                false
            }
        }
    }

    // === Leaderboard ===

    /// Record `scores` in the leaderboard and persist it.
    ///
    /// Returns how many entries were added.
    pub fn record_result(&self, scores: &FinalScores) -> usize {
        let mut game = self.game();
        let added = self.record_into_board(scores);
        game.events.push(GameEvent::LeaderboardUpdated);
        added
    }

    /// Record the live scores of the current game.
    pub fn record_current_result(&self) -> usize {
        let mut game = self.game();
        let scores = self.rules.final_scores(&game.state);
        let added = self.record_into_board(&scores);
        game.events.push(GameEvent::LeaderboardUpdated);
        added
    }

    /// The five best results.
    #[must_use]
    pub fn top5(&self) -> Vec<RankedEntry> {
        self.board().top5()
    }

    /// Copy of the whole leaderboard.
    #[must_use]
    pub fn leaderboard(&self) -> Leaderboard {
        self.board().clone()
    }

    /// Callers must already hold the game lock.
    fn record_into_board(&self, scores: &FinalScores) -> usize {
        let mut board = self.board();
        let added = board.record(scores.pairs());
        if let Some(path) = &self.config.leaderboard_path {
            board.persist(path);
        }
        info!(added, total = board.len(), "results recorded");
        added
    }

    // === Events ===

    /// Take every pending event, oldest first.
    ///
    /// The transport should call this after each request. Undrained events
    /// pile up to `events::MAX_PENDING_EVENTS`, after which the oldest are dropped.
    pub fn drain_events(&self) -> Vec<GameEvent> {
        self.game().events.drain()
    }
}
