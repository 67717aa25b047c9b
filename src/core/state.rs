//! Game state.
//!
//! `GameState` is the single aggregate the rule engine works on:
//! - Seated players in turn order, with hands and collected piles
//! - The draw pile and the parade row
//! - Turn pointer, last-round latch, started flag
//! - Deal sizes and the play history of the current game
//! - The shuffle RNG
//!
//! It holds data only; the rules live in `rules::engine`. Every collection
//! is an `im` persistent structure so a play can be applied to a clone and
//! swapped in once it validates.

use im::Vector;

use super::action::PlayRecord;
use super::player::{Player, PlayerId};
use super::rng::GameRng;
use crate::cards::{Card, Deck};

/// Full game state.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Seated players; seat order is turn order.
    pub(crate) players: Vector<Player>,

    /// Draw pile (LIFO).
    pub(crate) deck: Deck,

    /// Face-up row, oldest card first.
    pub(crate) parade_row: Vector<Card>,

    /// Index into `players` of the player to act.
    pub(crate) turn: usize,

    /// One-shot latch: no draws once set.
    pub(crate) last_round: bool,

    /// Set by the first deal or a load; freezes the seating.
    pub(crate) started: bool,

    /// Row size used at the last deal.
    pub(crate) parade_size: usize,

    /// Hand size used at the last deal.
    pub(crate) hand_size: usize,

    /// Plays committed since the last deal.
    pub(crate) history: Vector<PlayRecord>,

    /// Deterministic shuffle source.
    pub(crate) rng: GameRng,
}

impl GameState {
    /// Create an empty lobby with the given RNG.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self {
            players: Vector::new(),
            deck: Deck::new(),
            parade_row: Vector::new(),
            turn: 0,
            last_round: false,
            started: false,
            parade_size: 0,
            hand_size: 0,
            history: Vector::new(),
            rng,
        }
    }

    /// Create an empty lobby with a fixed seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameRng::new(seed))
    }

    // === Players ===

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Seated players in turn order.
    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        &self.players
    }

    /// Look up a player by ID.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Find a seated player by name, ignoring case.
    #[must_use]
    pub fn find_player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name_matches(name))
    }

    /// Player names in seat order.
    #[must_use]
    pub fn player_names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name().to_string()).collect()
    }

    /// Seat a new player at the end of the turn order.
    ///
    /// Lobby checks (started, duplicates, capacity) belong to the engine.
    pub(crate) fn seat(&mut self, name: &str) -> PlayerId {
        let id = PlayerId::new(self.players.len() as u8);
        self.players.push_back(Player::new(id, name));
        id
    }

    // === Turn ===

    /// Index of the player to act.
    #[must_use]
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// The player to act, if anyone is seated.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.turn)
    }

    /// Move the turn pointer to the next seat.
    pub(crate) fn advance_turn(&mut self) {
        if !self.players.is_empty() {
            self.turn = (self.turn + 1) % self.players.len();
        }
    }

    // === Cards ===

    /// The draw pile.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The parade row, oldest first.
    #[must_use]
    pub fn parade_row(&self) -> &Vector<Card> {
        &self.parade_row
    }

    /// Cards currently accounted for across every pile.
    ///
    /// Equals the deck size after any deal; plays must preserve it.
    #[must_use]
    pub fn card_count(&self) -> usize {
        let held: usize = self
            .players
            .iter()
            .map(|p| p.hand.len() + p.collected.len())
            .sum();
        self.deck.len() + self.parade_row.len() + held
    }

    // === Flags ===

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub fn is_last_round(&self) -> bool {
        self.last_round
    }

    /// Deal sizes `(parade_size, hand_size)` of the current game.
    #[must_use]
    pub fn deal_sizes(&self) -> (usize, usize) {
        (self.parade_size, self.hand_size)
    }

    // === History ===

    /// Plays committed since the last deal.
    #[must_use]
    pub fn history(&self) -> &Vector<PlayRecord> {
        &self.history
    }

    /// The shuffle RNG.
    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Color;

    #[test]
    fn test_new_state_is_empty_lobby() {
        let state = GameState::with_seed(42);
        assert_eq!(state.player_count(), 0);
        assert!(!state.is_started());
        assert!(!state.is_last_round());
        assert!(state.current_player().is_none());
        assert_eq!(state.card_count(), 0);
    }

    #[test]
    fn test_seat_assigns_sequential_ids() {
        let mut state = GameState::with_seed(42);
        assert_eq!(state.seat("Ana"), PlayerId::new(0));
        assert_eq!(state.seat("Beto"), PlayerId::new(1));

        assert_eq!(state.player_names(), vec!["Ana".to_string(), "Beto".to_string()]);
        assert_eq!(state.player(PlayerId::new(1)).unwrap().name(), "Beto");
        assert!(state.player(PlayerId::new(2)).is_none());
        assert_eq!(state.find_player("ana").unwrap().id(), PlayerId::new(0));
    }

    #[test]
    fn test_advance_turn_wraps() {
        let mut state = GameState::with_seed(42);
        state.advance_turn();
        assert_eq!(state.turn(), 0);

        state.seat("Ana");
        state.seat("Beto");
        state.seat("Caro");
        state.advance_turn();
        assert_eq!(state.turn(), 1);
        state.advance_turn();
        state.advance_turn();
        assert_eq!(state.turn(), 0);
    }

    #[test]
    fn test_card_count_spans_all_piles() {
        let mut state = GameState::with_seed(42);
        let id = state.seat("Ana");
        let c = |rank| Card::new(Color::Green, rank).unwrap();

        state.deck = Deck::from_cards([c(0), c(1)]);
        state.parade_row.push_back(c(2));
        let player = &mut state.players[id.index()];
        player.hand.push_back(c(3));
        player.collected.push_back(c(4));

        assert_eq!(state.card_count(), 5);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = GameState::with_seed(42);
        state.seat("Ana");
        let snapshot = state.clone();

        state.parade_row.push_back(Card::new(Color::Red, 1).unwrap());
        assert!(snapshot.parade_row().is_empty());
        assert_eq!(state.parade_row().len(), 1);
    }
}
