//! Shared helpers for integration tests.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use parade_engine::{ParadeConfig, PlayerId, Table};
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once. Level from `TEST_LOG`, then `RUST_LOG`,
/// default `warn`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Seeded config with no leaderboard file.
pub fn test_config(seed: u64) -> ParadeConfig {
    ParadeConfig::new().with_seed(seed).without_leaderboard_file()
}

/// Table with the given players seated, not yet started.
pub fn seated_table(seed: u64, names: &[&str]) -> Table {
    init_logging();
    let table = Table::new(test_config(seed)).unwrap();
    for name in names {
        table.join(name).unwrap();
    }
    table
}

/// Play index 0 for whoever is to act until the game ends.
///
/// Returns the number of plays made.
pub fn play_out(table: &Table) -> usize {
    let mut plays = 0;
    while !table.is_game_over() {
        let player = table.current_turn().unwrap();
        let outcome = table.play(player, 0).unwrap();
        assert!(outcome.is_applied(), "play {plays} ignored: {outcome:?}");
        plays += 1;
        assert!(plays < 500, "game did not terminate");
    }
    plays
}

/// Proptest config; `PROPTEST_CASES` overrides the case count.
pub fn proptest_config() -> proptest::prelude::ProptestConfig {
    let base = proptest::prelude::ProptestConfig::default();
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(64)
        .max(1);

    proptest::prelude::ProptestConfig {
        failure_persistence: None,
        cases,
        ..base
    }
}

pub fn seat(index: u8) -> PlayerId {
    PlayerId::new(index)
}
