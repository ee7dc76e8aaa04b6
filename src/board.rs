// Copyright 2026 the arbiter developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The piece-placement component of a game state: which piece, if any,
//! stands on each of the 64 squares. Placement is stored as one bitboard
//! per (color, kind) pair plus one per color, the usual redundant layout
//! that makes both "where are the white knights" and "is e4 occupied"
//! single lookups.
//!
//! `Board` also hosts the attack detector: `attackers` answers which pieces
//! of a color bear on a square, with no notion of turn order or legality.
use std::fmt;

use crate::attacks;
use crate::bitboard::Bitboard;
use crate::types::{Color, Piece, PieceKind, Square, TableIndex};
use crate::types::{FILES, PIECE_KINDS, RANKS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    by_piece: [Bitboard; 12],
    by_color: [Bitboard; 2],
}

impl Board {
    pub fn empty() -> Board {
        Board {
            by_piece: [Bitboard::none(); 12],
            by_color: [Bitboard::none(); 2],
        }
    }

    fn piece_offset(color: Color) -> usize {
        match color {
            Color::White => 0,
            Color::Black => 6,
        }
    }

    /// Places a piece on a square. Fails if the square is occupied.
    pub fn add_piece(&mut self, square: Square, piece: Piece) -> Result<(), ()> {
        if self.piece_at(square).is_some() {
            return Err(());
        }

        self.by_color[piece.color.as_index()].set(square);
        self.by_piece[Board::piece_offset(piece.color) + piece.kind.as_index()].set(square);
        Ok(())
    }

    /// Removes the piece on a square, returning it. Fails if the square is
    /// empty.
    pub fn remove_piece(&mut self, square: Square) -> Result<Piece, ()> {
        let piece = self.piece_at(square).ok_or(())?;
        self.by_color[piece.color.as_index()].unset(square);
        self.by_piece[Board::piece_offset(piece.color) + piece.kind.as_index()].unset(square);
        Ok(piece)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let color = if self.by_color[Color::White.as_index()].test(square) {
            Color::White
        } else if self.by_color[Color::Black.as_index()].test(square) {
            Color::Black
        } else {
            return None;
        };

        for &kind in &PIECE_KINDS {
            if self.by_piece[Board::piece_offset(color) + kind.as_index()].test(square) {
                return Some(Piece::new(kind, color));
            }
        }

        // The color and piece boards disagree; a bitboard update was missed.
        unreachable!()
    }

    pub fn pieces(&self, color: Color) -> Bitboard {
        self.by_color[color.as_index()]
    }

    pub fn pieces_of_kind(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.by_piece[Board::piece_offset(color) + kind.as_index()]
    }

    pub fn pawns(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Pawn)
    }

    pub fn knights(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Knight)
    }

    pub fn bishops(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Bishop)
    }

    pub fn rooks(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Rook)
    }

    pub fn queens(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Queen)
    }

    pub fn kings(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::King)
    }

    /// Every occupied square, regardless of color.
    pub fn occupancy(&self) -> Bitboard {
        self.pieces(Color::White) | self.pieces(Color::Black)
    }

    /// The set of pieces of `color` attacking `target` in one step under
    /// their movement rule. This is the attack detector: it ignores turn
    /// order and check entirely, and never recurses into move legality.
    ///
    /// Sliders are resolved by reverse lookup: a bishop attacks `target`
    /// exactly when a bishop standing on `target` would attack it, so one
    /// ray lookup from `target` finds all of them. Pawn attacks are
    /// asymmetric between the colors, so the reverse lookup uses the
    /// opposite color's pattern.
    pub fn attackers(&self, color: Color, target: Square) -> Bitboard {
        let occupancy = self.occupancy();
        let diagonal_sliders = self.bishops(color) | self.queens(color);
        let orthogonal_sliders = self.rooks(color) | self.queens(color);

        attacks::pawn_attacks(target, color.toggle()).and(self.pawns(color))
            | attacks::knight_attacks(target).and(self.knights(color))
            | attacks::king_attacks(target).and(self.kings(color))
            | attacks::bishop_attacks(target, occupancy).and(diagonal_sliders)
            | attacks::rook_attacks(target, occupancy).and(orthogonal_sliders)
    }

    pub fn is_attacked(&self, color: Color, target: Square) -> bool {
        !self.attackers(color, target).empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                match self.piece_at(Square::of(rank, file)) {
                    Some(piece) => write!(f, " {} ", piece)?,
                    None => write!(f, " . ")?,
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}
