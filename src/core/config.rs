//! Table configuration.
//!
//! `ParadeConfig` holds the default deal sizes, the terminal hand size,
//! seat limits, the leaderboard file and the RNG seed.
//!
//! ```
//! use parade_engine::core::ParadeConfig;
//!
//! let config = ParadeConfig::new()
//!     .with_seed(7)
//!     .with_max_players(2)
//!     .without_leaderboard_file();
//! assert!(config.validate().is_ok());
//! ```

use std::path::PathBuf;

use crate::error::ConfigError;

/// Default number of cards dealt face up to start the parade row.
pub const DEFAULT_PARADE_SIZE: usize = 6;

/// Default hand size.
pub const DEFAULT_HAND_SIZE: usize = 5;

/// Hand size at which a game in its last round is over.
pub const DEFAULT_TERMINAL_HAND_SIZE: usize = 4;

/// Default leaderboard file.
pub const DEFAULT_LEADERBOARD_FILE: &str = "ranking.dat";

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParadeConfig {
    /// Row size used by `start_default_game`.
    pub default_parade_size: usize,

    /// Hand size used by `start_default_game`.
    pub default_hand_size: usize,

    /// The game ends once the last round is on and every hand holds
    /// exactly this many cards.
    pub terminal_hand_size: usize,

    /// Seated players required to start.
    pub min_players: usize,

    /// Seats available; joins beyond this are refused.
    pub max_players: usize,

    /// Leaderboard file. `None` keeps the leaderboard in memory only.
    pub leaderboard_path: Option<PathBuf>,

    /// RNG seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ParadeConfig {
    fn default() -> Self {
        Self {
            default_parade_size: DEFAULT_PARADE_SIZE,
            default_hand_size: DEFAULT_HAND_SIZE,
            terminal_hand_size: DEFAULT_TERMINAL_HAND_SIZE,
            min_players: 2,
            max_players: 6,
            leaderboard_path: Some(PathBuf::from(DEFAULT_LEADERBOARD_FILE)),
            seed: None,
        }
    }
}

impl ParadeConfig {
    /// Create a configuration with the standard Parade defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default deal sizes.
    #[must_use]
    pub fn with_deal(mut self, parade_size: usize, hand_size: usize) -> Self {
        self.default_parade_size = parade_size;
        self.default_hand_size = hand_size;
        self
    }

    /// Set the terminal hand size.
    #[must_use]
    pub fn with_terminal_hand_size(mut self, size: usize) -> Self {
        self.terminal_hand_size = size;
        self
    }

    /// Set the minimum seated players to start.
    #[must_use]
    pub fn with_min_players(mut self, count: usize) -> Self {
        self.min_players = count;
        self
    }

    /// Set the seat limit.
    #[must_use]
    pub fn with_max_players(mut self, count: usize) -> Self {
        self.max_players = count;
        self
    }

    /// Persist the leaderboard at `path`.
    #[must_use]
    pub fn with_leaderboard_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.leaderboard_path = Some(path.into());
        self
    }

    /// Keep the leaderboard in memory only.
    #[must_use]
    pub fn without_leaderboard_file(mut self) -> Self {
        self.leaderboard_path = None;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check seat bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players == 0 {
            return Err(ConfigError::NoPlayersAllowed);
        }
        if self.max_players > usize::from(u8::MAX) {
            return Err(ConfigError::TooManySeats(self.max_players));
        }
        if self.min_players > self.max_players {
            return Err(ConfigError::PlayerBoundsInverted {
                min: self.min_players,
                max: self.max_players,
            });
        }
        Ok(())
    }
}
