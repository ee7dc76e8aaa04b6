// Copyright 2026 the arbiter developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use arbiter::{Color, GameState, Move, Square};

fn play(state: GameState, moves: &[&str]) -> GameState {
    moves.iter().fold(state, |state, &uci| {
        let mov = state
            .move_from_uci(uci)
            .unwrap_or_else(|| panic!("{} does not parse in {}", uci, state.as_fen()));
        state.apply_move(mov, None).unwrap()
    })
}

#[test]
fn fools_mate() {
    let state = play(GameState::new(), &["f2f3", "e7e5", "g2g4", "d8h4"]);
    let status = state.status();
    assert!(status.check);
    assert!(status.checkmate);
    assert!(!status.stalemate);
    assert_eq!(Some(Color::Black), status.winner);
    assert!(status.is_game_over());
    assert!(state.legal_moves().is_empty());
}

#[test]
fn stalemate_reached_by_a_move() {
    let state = GameState::from_fen("7k/8/6K1/8/8/8/5Q2/8 w - - 0 1").unwrap();
    assert!(!state.status().is_game_over());

    let next = state
        .apply_move(Move::quiet(Square::F2, Square::F7), None)
        .unwrap();
    let status = next.status();
    assert!(status.stalemate);
    assert!(!status.check);
    assert!(!status.checkmate);
    assert!(status.is_draw());
    assert_eq!(None, status.winner);
}

#[test]
fn capture_into_bare_kings_is_a_dead_draw() {
    let state = GameState::from_fen("k7/8/8/8/8/8/1r6/K7 w - - 0 1").unwrap();
    assert!(!state.status().insufficient_material);

    let next = state
        .apply_move(Move::capture(Square::A1, Square::B2), None)
        .unwrap();
    assert!(next.status().insufficient_material);
    assert!(next.status().is_draw());
    assert!(next.status().is_game_over());
}

#[test]
fn threefold_repetition_triggers_on_the_third_occurrence() {
    let shuttle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    let mut state = GameState::new();

    // Two full knight shuttles: every position seen at most twice.
    for _ in 0..2 {
        state = play(state, &shuttle);
        assert!(!state.status().threefold_repetition);
    }

    // The ninth ply recreates the post-Nf3 position for the third time.
    assert_eq!(2, state.repetitions());
    state = play(state, &["g1f3"]);
    assert!(state.status().threefold_repetition);
    assert!(state.status().is_draw());
}

#[test]
fn repetition_counts_survive_intervening_moves() {
    // The count is cumulative over the whole game, not over a consecutive
    // streak: interleave a different shuttle between recurrences.
    let state = play(
        GameState::new(),
        &[
            "g1f3", "g8f6", "f3g1", "f6g8", // first recurrence of the start placement
            "b1c3", "b8c6", "c3b1", "c6b8", // a different shuttle, same effect
        ],
    );
    assert_eq!(2, state.repetitions());
    assert!(!state.status().threefold_repetition);

    let state = play(state, &["g1f3", "g8f6", "f3g1", "f6g8"]);
    assert!(state.status().threefold_repetition);
}

#[test]
fn fifty_move_rule_triggers_at_one_hundred_halfmoves() {
    let state = GameState::from_fen("7k/8/8/8/8/8/8/R6K w - - 98 80").unwrap();
    let after_white = play(state, &["a1a2"]);
    assert_eq!(99, after_white.halfmove_clock());
    assert!(!after_white.status().fifty_move_rule);

    let after_black = play(after_white, &["h8g8"]);
    assert_eq!(100, after_black.halfmove_clock());
    assert!(after_black.status().fifty_move_rule);
    assert!(after_black.status().is_draw());
}

#[test]
fn pawn_move_resets_the_fifty_move_count() {
    let state = GameState::from_fen("7k/8/8/8/8/4P3/8/R6K w - - 99 80").unwrap();
    let next = play(state, &["e3e4"]);
    assert_eq!(0, next.halfmove_clock());
    assert!(!next.status().fifty_move_rule);
}

#[test]
fn checkmate_beats_the_clock() {
    // The mating move is also the hundredth halfmove; mate wins, and the
    // draw flag still reports independently.
    let state = GameState::from_fen("6k1/8/5K2/8/8/8/8/7R w - - 99 80").unwrap();
    let next = play(state, &["h1h8"]);
    let status = next.status();
    assert!(status.checkmate);
    assert_eq!(Some(Color::White), status.winner);
    assert!(status.fifty_move_rule);
    assert!(status.is_game_over());
}

#[test]
fn terminal_states_still_enumerate_nothing() {
    // A mated side has no legal moves, and applying from a terminal state
    // is simply never attempted by well-behaved callers; the enumeration
    // contract is what the engine guarantees.
    let state = play(GameState::new(), &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert!(state.legal_moves().is_empty());
    assert!(state.legal_moves_from(Square::E1).is_empty());
}
