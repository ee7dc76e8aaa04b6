// Copyright 2026 the arbiter developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use arbiter::{GameState, Move, Square};

fn legal_move_count(fen: &str) -> usize {
    GameState::from_fen(fen).unwrap().legal_moves().len()
}

#[test]
fn known_position_move_counts() {
    assert_eq!(
        20,
        legal_move_count("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
    );
    assert_eq!(
        48,
        legal_move_count("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
    );
    assert_eq!(
        14,
        legal_move_count("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1")
    );
    assert_eq!(
        6,
        legal_move_count("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1")
    );
}

#[test]
fn every_legal_move_applies_cleanly() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "8/8/8/3pP3/8/8/8/k6K w - d6 0 1",
    ];

    for &fen in &fens {
        let state = GameState::from_fen(fen).unwrap();
        let mover = state.side_to_move();
        for mov in state.legal_moves() {
            let next = state
                .apply_move(mov, None)
                .unwrap_or_else(|err| panic!("{} failed to apply in {}: {}", mov, fen, err));
            assert!(
                !next.is_in_check(mover),
                "{} left the mover in check in {}",
                mov,
                fen
            );
        }
    }
}

#[test]
fn legal_moves_agree_with_per_square_generation() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let state = GameState::from_fen(fen).unwrap();
    let all = state.legal_moves();

    let mut collected: Vec<Move> = Vec::new();
    for square in state.board().pieces(state.side_to_move()) {
        collected.extend(state.legal_moves_from(square));
    }

    assert_eq!(all.len(), collected.len());
    for mov in &all {
        assert!(collected.contains(mov), "{} missing from per-square moves", mov);
    }
}

#[test]
fn both_castles_available_in_kiwipete() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let moves = GameState::from_fen(fen).unwrap().legal_moves();
    assert!(moves.contains(&Move::kingside_castle(Square::E1, Square::G1)));
    assert!(moves.contains(&Move::queenside_castle(Square::E1, Square::C1)));
}

#[test]
fn checked_side_must_resolve_the_check() {
    // Black queen gives check on the a5-e1 diagonal.
    let fen = "rnb1kbnr/pp1ppppp/8/q1p5/3P4/4P3/PPP2PPP/RNBQKBNR w KQkq - 0 1";
    let state = GameState::from_fen(fen).unwrap();
    assert!(state.status().check);

    for mov in state.legal_moves() {
        let next = state.apply_move(mov, None).unwrap();
        assert!(!next.is_in_check(arbiter::Color::White));
    }
}
