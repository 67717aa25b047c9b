//! Core engine types: players, state, play records, RNG, configuration.
//!
//! These are plain data. The rules that move cards between piles live in
//! `rules`.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{Player, PlayerId};
pub use rng::{GameRng, GameRngState};
pub use config::{
    ParadeConfig, DEFAULT_HAND_SIZE, DEFAULT_LEADERBOARD_FILE, DEFAULT_PARADE_SIZE,
    DEFAULT_TERMINAL_HAND_SIZE,
};
pub use action::PlayRecord;
pub use state::GameState;
