// Copyright 2026 the arbiter developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move generation, in two layers. The pseudo-legal layer produces every
//! move that obeys piece movement rules, capture rules, and the castling
//! preconditions, without asking whether the mover's king ends up attacked.
//! The legal layer filters that set by simulating each candidate's full
//! state transition and discarding any that leave the mover in check.
//!
//! Pawn moves that reach the last rank are only ever emitted as promotions,
//! tagged with queen; the caller picks a different piece at apply time.
use arrayvec::ArrayVec;

use crate::attacks;
use crate::bitboard::Bitboard;
use crate::moves::Move;
use crate::state::{pawn_push_direction, pawn_retreat_direction, rook_home, CastleSide, GameState};
use crate::types::{Color, Direction, PieceKind, Rank, Square};

/// A stack-allocated vector of moves. No chess position has more than 256
/// moves available, pseudo-legal or otherwise.
pub type MoveVec = ArrayVec<[Move; 256]>;

/// The move generator. It carries no state of its own; all inputs come from
/// the `GameState` handed to each call.
#[derive(Copy, Clone, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> MoveGenerator {
        MoveGenerator
    }

    /// Generates every pseudo-legal move for `color`, appending to `moves`.
    pub fn pseudo_legal_moves(&self, state: &GameState, color: Color, moves: &mut MoveVec) {
        for square in state.board().pieces(color) {
            self.pseudo_legal_moves_from(state, color, square, moves);
        }
    }

    /// Generates the pseudo-legal moves originating from `square`. Appends
    /// nothing when the square does not hold a piece of `color`.
    pub fn pseudo_legal_moves_from(
        &self,
        state: &GameState,
        color: Color,
        square: Square,
        moves: &mut MoveVec,
    ) {
        let piece = match state.board().piece_at(square) {
            Some(piece) if piece.color == color => piece,
            _ => return,
        };

        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(state, color, square, moves),
            PieceKind::Knight => {
                self.leaper_moves(state, color, square, attacks::knight_attacks(square), moves)
            }
            PieceKind::Bishop => {
                let targets = attacks::bishop_attacks(square, state.board().occupancy());
                self.leaper_moves(state, color, square, targets, moves)
            }
            PieceKind::Rook => {
                let targets = attacks::rook_attacks(square, state.board().occupancy());
                self.leaper_moves(state, color, square, targets, moves)
            }
            PieceKind::Queen => {
                let targets = attacks::queen_attacks(square, state.board().occupancy());
                self.leaper_moves(state, color, square, targets, moves)
            }
            PieceKind::King => self.king_moves(state, color, square, moves),
        }
    }

    /// The legal moves for the side to move: the pseudo-legal set minus
    /// every move whose resulting position leaves the mover's king attacked.
    pub fn legal_moves(&self, state: &GameState) -> MoveVec {
        let mut pseudo = MoveVec::default();
        self.pseudo_legal_moves(state, state.side_to_move(), &mut pseudo);
        self.filter_legal(state, &pseudo)
    }

    /// The legal moves originating from a single square.
    pub fn legal_moves_from(&self, state: &GameState, square: Square) -> MoveVec {
        let mut pseudo = MoveVec::default();
        self.pseudo_legal_moves_from(state, state.side_to_move(), square, &mut pseudo);
        self.filter_legal(state, &pseudo)
    }

    /// Whether a move already known to be pseudo-legal is legal: the full
    /// transition is simulated on a scratch copy and the mover's king is
    /// inspected afterwards. Simulating the real transition means en
    /// passant, castling, and promotions need no special-case pin logic.
    pub fn is_legal_given_pseudolegal(&self, state: &GameState, mov: Move) -> bool {
        let mover = state.side_to_move();
        !state.speculate(mov).is_in_check(mover)
    }

    fn filter_legal(&self, state: &GameState, pseudo: &MoveVec) -> MoveVec {
        let mut legal = MoveVec::default();
        for &mov in pseudo {
            if self.is_legal_given_pseudolegal(state, mov) {
                legal.push(mov);
            }
        }

        legal
    }

    fn pawn_moves(&self, state: &GameState, color: Color, square: Square, moves: &mut MoveVec) {
        let (start_rank, promo_rank) = match color {
            Color::White => (Rank::Two, Rank::Eight),
            Color::Black => (Rank::Seven, Rank::One),
        };
        let push = pawn_push_direction(color);
        let occupancy = state.board().occupancy();
        let enemies = state.board().pieces(color.toggle());

        // Single and double pushes. A pawn never stands on the last rank,
        // so one step forward always stays on the board.
        let one_up = square.towards(push);
        if !occupancy.test(one_up) {
            if one_up.rank() == promo_rank {
                moves.push(Move::promotion(square, one_up, PieceKind::Queen));
            } else {
                moves.push(Move::quiet(square, one_up));
                if square.rank() == start_rank {
                    let two_up = one_up.towards(push);
                    if !occupancy.test(two_up) {
                        moves.push(Move::double_pawn_push(square, two_up));
                    }
                }
            }
        }

        for target in attacks::pawn_attacks(square, color) {
            if enemies.test(target) {
                if target.rank() == promo_rank {
                    moves.push(Move::promotion_capture(square, target, PieceKind::Queen));
                } else {
                    moves.push(Move::capture(square, target));
                }
            }
        }

        // En passant is only available to the side to move, and only during
        // the one ply the window is open.
        if color == state.side_to_move() {
            if let Some(ep_square) = state.en_passant_square() {
                if attacks::pawn_attacks(square, color).test(ep_square) {
                    let victim = ep_square.towards(pawn_retreat_direction(color));
                    if state.board().pawns(color.toggle()).test(victim) {
                        moves.push(Move::en_passant(square, ep_square));
                    }
                }
            }
        }
    }

    /// Moves for any piece whose attack set is its move set: knights and
    /// kings directly, and sliders once their rays have been truncated by
    /// occupancy.
    fn leaper_moves(
        &self,
        state: &GameState,
        color: Color,
        square: Square,
        targets: Bitboard,
        moves: &mut MoveVec,
    ) {
        let friends = state.board().pieces(color);
        let enemies = state.board().pieces(color.toggle());
        for target in targets {
            if enemies.test(target) {
                moves.push(Move::capture(square, target));
            } else if !friends.test(target) {
                moves.push(Move::quiet(square, target));
            }
        }
    }

    fn king_moves(&self, state: &GameState, color: Color, square: Square, moves: &mut MoveVec) {
        self.leaper_moves(state, color, square, attacks::king_attacks(square), moves);

        // Castling. Beyond holding the right, the king must not currently
        // be in check, every square between king and rook must be empty,
        // and no square the king crosses or lands on may be attacked. On
        // the queenside the b-file square must be empty but only the rook
        // crosses it, so it may be attacked.
        let them = color.toggle();
        let board = state.board();
        if board.is_attacked(them, square) {
            return;
        }

        let occupancy = board.occupancy();
        if state.can_castle_kingside(color) && board.rooks(color).test(rook_home(color, CastleSide::Kingside)) {
            let one = square.towards(Direction::East);
            let two = one.towards(Direction::East);
            if !occupancy.test(one)
                && !occupancy.test(two)
                && !board.is_attacked(them, one)
                && !board.is_attacked(them, two)
            {
                moves.push(Move::kingside_castle(square, two));
            }
        }

        if state.can_castle_queenside(color) && board.rooks(color).test(rook_home(color, CastleSide::Queenside)) {
            let one = square.towards(Direction::West);
            let two = one.towards(Direction::West);
            let three = two.towards(Direction::West);
            if !occupancy.test(one)
                && !occupancy.test(two)
                && !occupancy.test(three)
                && !board.is_attacked(them, one)
                && !board.is_attacked(them, two)
            {
                moves.push(Move::queenside_castle(square, two));
            }
        }
    }
}
