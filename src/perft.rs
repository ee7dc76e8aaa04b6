// Copyright 2026 the arbiter developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Perft, the standard whole-engine test for move generation and move
//! application: count the leaves of the legal move tree to a fixed depth
//! and compare against independently verified values. A single wrong
//! castling rule or en-passant edge case shifts the totals immediately.
//!
//! Promotion moves are expanded into all four promotion choices so the
//! totals line up with published tables, which count each choice as a
//! distinct move.
use rayon::prelude::*;

use crate::movegen::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::state::GameState;
use crate::types::PieceKind;

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

/// Counts the leaf nodes of the legal move tree rooted at `state`, `depth`
/// plies deep. The top level fans out across threads; each subtree is
/// walked sequentially.
pub fn perft(state: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    candidate_moves(state)
        .par_iter()
        .map(|&mov| expand(state, mov, depth))
        .sum()
}

fn perft_sequential(state: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    candidate_moves(state)
        .iter()
        .map(|&mov| expand(state, mov, depth))
        .sum()
}

fn candidate_moves(state: &GameState) -> MoveVec {
    let generator = MoveGenerator::new();
    let mut pseudo = MoveVec::default();
    generator.pseudo_legal_moves(state, state.side_to_move(), &mut pseudo);

    let mut candidates = MoveVec::default();
    for &mov in &pseudo {
        if mov.is_promotion() {
            // Whether a promotion is legal does not depend on the chosen
            // piece, but each choice is its own tree node.
            for &kind in &PROMOTION_KINDS {
                candidates.push(mov.with_promotion(kind));
            }
        } else {
            candidates.push(mov);
        }
    }

    candidates
}

fn expand(state: &GameState, mov: Move, depth: u32) -> u64 {
    let mover = state.side_to_move();
    let next = state.speculate(mov);
    if next.is_in_check(mover) {
        return 0;
    }

    perft_sequential(&next, depth - 1)
}
