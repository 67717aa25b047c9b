//! Property tests for the rule engine.

mod common;

use im::Vector;
use parade_engine::rules::{compute_removal, is_taken};
use parade_engine::{Card, Color, GameState, ParadeRules, PlayerId, DECK_SIZE};
use proptest::prelude::*;
use proptest::sample::subsequence;

fn color() -> impl Strategy<Value = Color> {
    prop::sample::select(Color::ALL.to_vec())
}

fn card() -> impl Strategy<Value = Card> {
    (color(), 0u8..=10).prop_map(|(color, rank)| Card::new(color, rank).unwrap())
}

/// A row of distinct cards, plus a played card not in it.
fn row_and_card() -> impl Strategy<Value = (Vec<Card>, Card)> {
    let all: Vec<Card> = Card::all().collect();
    (subsequence(all, 0..=20).prop_shuffle(), card())
        .prop_filter_map("played card already in row", |(row, played)| {
            (!row.contains(&played)).then_some((row, played))
        })
}

fn started_state(seed: u64, players: usize) -> (ParadeRules, GameState) {
    let rules = ParadeRules::new();
    let mut state = GameState::with_seed(seed);
    for i in 0..players {
        rules.join(&mut state, &format!("P{i}")).unwrap();
    }
    rules.start_game(&mut state, 6, 5).unwrap();
    (rules, state)
}

proptest! {
    #![proptest_config(common::proptest_config())]

    /// Exactly the exposed cards that match by color or low rank are taken.
    #[test]
    fn prop_removal_matches_rule((row, played) in row_and_card()) {
        let row: Vector<Card> = row.into_iter().collect();
        let removal = compute_removal(&row, played);
        let exposed = row.len().saturating_sub(usize::from(played.rank()));

        for (i, &candidate) in row.iter().enumerate() {
            let taken = removal.indices().contains(&i);
            prop_assert_eq!(taken, i < exposed && is_taken(candidate, played));
        }
        prop_assert!(removal.indices().windows(2).all(|w| w[0] < w[1]));
    }

    /// Cards are conserved and the turn rotates on every committed play.
    #[test]
    fn prop_play_sequence_invariants(
        seed in any::<u64>(),
        players in 2usize..=6,
        picks in prop::collection::vec(0usize..5, 1..120),
    ) {
        let (rules, mut state) = started_state(seed, players);
        let mut latched = false;

        for pick in picks {
            if rules.is_game_over(&state) {
                break;
            }
            let actor = state.turn();
            let hand_len = state.players()[actor].hand().len();
            let outcome = rules
                .play(&mut state, PlayerId::new(actor as u8), pick % hand_len)
                .unwrap();

            prop_assert!(outcome.is_applied());
            prop_assert_eq!(state.card_count(), DECK_SIZE);
            prop_assert_eq!(state.turn(), (actor + 1) % players);
            if latched {
                prop_assert!(state.is_last_round());
            }
            latched = state.is_last_round();
        }
    }

    /// A rejected play changes nothing.
    #[test]
    fn prop_out_of_turn_is_noop(seed in any::<u64>(), players in 2usize..=6, offset in 1usize..6) {
        let (rules, mut state) = started_state(seed, players);
        let intruder = 1 + offset % (players - 1);

        let row = state.parade_row().clone();
        let hand = state.players()[intruder].hand().clone();
        let outcome = rules.play(&mut state, PlayerId::new(intruder as u8), 0).unwrap();

        prop_assert!(!outcome.is_applied());
        prop_assert_eq!(state.parade_row(), &row);
        prop_assert_eq!(state.players()[intruder].hand(), &hand);
        prop_assert_eq!(state.turn(), 0);
    }
}
