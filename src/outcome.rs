// Copyright 2026 the arbiter developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Terminal condition evaluation: check, checkmate, stalemate, and the
//! three automatic draws. Every applied move ends with `evaluate` stamping
//! a fresh [`Status`] onto the successor state, so callers never have to
//! ask "is the game over" themselves; they read it off the state.
use crate::bitboard::{Bitboard, BB_LIGHT_SQUARES};
use crate::board::Board;
use crate::state::GameState;
use crate::types::{Color, COLORS};

/// The halfmove-clock threshold for the fifty-move rule: fifty full moves
/// without a pawn move or capture.
const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// The terminal flags of a position, recomputed from scratch after every
/// applied move. Draw conditions are reported independently; a position can
/// be, say, both a fifty-move draw and a threefold repetition at once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Status {
    /// The side to move is in check.
    pub check: bool,
    /// The side to move is in check with no legal moves; the other side
    /// wins.
    pub checkmate: bool,
    /// The side to move has no legal moves but is not in check.
    pub stalemate: bool,
    /// Neither side retains enough material to ever deliver mate.
    pub insufficient_material: bool,
    /// The current position has been reached three times.
    pub threefold_repetition: bool,
    /// One hundred halfmoves have passed without a pawn move or capture.
    pub fifty_move_rule: bool,
    /// The winning color, set exactly when `checkmate` is.
    pub winner: Option<Color>,
}

impl Status {
    pub fn is_draw(&self) -> bool {
        self.stalemate
            || self.insufficient_material
            || self.threefold_repetition
            || self.fifty_move_rule
    }

    pub fn is_game_over(&self) -> bool {
        self.checkmate || self.is_draw()
    }
}

/// Evaluates every terminal condition of `state` at once.
pub fn evaluate(state: &GameState) -> Status {
    let to_move = state.side_to_move();
    let check = state.is_in_check(to_move);
    let no_legal_moves = state.legal_moves().is_empty();
    let checkmate = check && no_legal_moves;

    Status {
        check,
        checkmate,
        stalemate: !check && no_legal_moves,
        insufficient_material: insufficient_material(state.board()),
        threefold_repetition: state.repetitions() >= 3,
        fifty_move_rule: state.halfmove_clock() >= FIFTY_MOVE_HALFMOVES,
        winner: if checkmate {
            Some(to_move.toggle())
        } else {
            None
        },
    }
}

/// Whether the remaining material makes mate impossible for both sides.
/// This is the finite table of dead positions: bare kings, a lone minor
/// piece, same-shade bishops, and two knights against a bare king. Any
/// pawn, rook, or queen on the board means mate is still constructible.
fn insufficient_material(board: &Board) -> bool {
    for &color in &COLORS {
        let majors_and_pawns = board.pawns(color) | board.rooks(color) | board.queens(color);
        if !majors_and_pawns.empty() {
            return false;
        }
    }

    let white_bishops = board.bishops(Color::White);
    let black_bishops = board.bishops(Color::Black);
    let white_knights = board.knights(Color::White);
    let black_knights = board.knights(Color::Black);
    let white_minors = white_bishops.count() + white_knights.count();
    let black_minors = black_bishops.count() + black_knights.count();

    match (white_minors, black_minors) {
        // King versus king, and king plus one minor versus king.
        (0, 0) | (1, 0) | (0, 1) => true,
        // Bishop versus bishop draws only when both run on the same shade.
        (1, 1) => {
            white_bishops.count() == 1
                && black_bishops.count() == 1
                && same_shade(white_bishops, black_bishops)
        }
        // Two knights cannot force mate against a bare king.
        (2, 0) => white_knights.count() == 2,
        (0, 2) => black_knights.count() == 2,
        _ => false,
    }
}

fn same_shade(one: Bitboard, other: Bitboard) -> bool {
    one.and(BB_LIGHT_SQUARES).empty() == other.and(BB_LIGHT_SQUARES).empty()
}
