// Copyright 2026 the arbiter developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `Move` type: a compact, ephemeral move proposal. A move carries only
//! its geometry and category; the moving piece and any captured piece are
//! recovered from the state it is applied to.
//!
//! Moves pack into a single `u16`:
//!
//!  * bits 0-5: source square
//!  * bits 6-11: destination square
//!  * bits 12-15: attribute nibble
//!
//! The attribute nibble distinguishes the special moves of chess:
//!
//! | Promo | Capture | Spc0 | Spc1 | Move                 |
//! |-------|---------|------|------|----------------------|
//! | 0     | 0       | 0    | 0    | Quiet                |
//! | 0     | 0       | 0    | 1    | Double pawn push     |
//! | 0     | 0       | 1    | 0    | Kingside castle      |
//! | 0     | 0       | 1    | 1    | Queenside castle     |
//! | 0     | 1       | 0    | 0    | Capture              |
//! | 0     | 1       | 0    | 1    | En passant capture   |
//! | 1     | *       | n    | n    | Promotion, promoted  |
//! |       |         |      |      | kind in `nn`         |
use num_traits::FromPrimitive;
use std::fmt::{self, Write};

use crate::types::{PieceKind, Square};

const SOURCE_MASK: u16 = 0x003F;
const DESTINATION_MASK: u16 = 0x0FC0;
const PROMO_BIT: u16 = 0x8000;
const CAPTURE_BIT: u16 = 0x4000;
const SPECIAL_0_BIT: u16 = 0x2000;
const SPECIAL_1_BIT: u16 = 0x1000;
const ATTR_SHIFT: u16 = 12;

/// A single move, packed into sixteen bits. A `Move` is a proposal produced
/// by the move generator and consumed by `GameState::apply_move`; it carries
/// no state of its own and is never mutated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// A quiet move: no capture, no special behavior.
    pub fn quiet(source: Square, dest: Square) -> Move {
        Move(source as u16 | ((dest as u16) << 6))
    }

    pub fn capture(source: Square, dest: Square) -> Move {
        Move(Move::quiet(source, dest).0 | CAPTURE_BIT)
    }

    pub fn en_passant(source: Square, dest: Square) -> Move {
        Move(Move::capture(source, dest).0 | SPECIAL_1_BIT)
    }

    pub fn double_pawn_push(source: Square, dest: Square) -> Move {
        Move(Move::quiet(source, dest).0 | SPECIAL_1_BIT)
    }

    pub fn kingside_castle(source: Square, dest: Square) -> Move {
        Move(Move::quiet(source, dest).0 | SPECIAL_0_BIT)
    }

    pub fn queenside_castle(source: Square, dest: Square) -> Move {
        Move(Move::quiet(source, dest).0 | SPECIAL_0_BIT | SPECIAL_1_BIT)
    }

    pub fn promotion(source: Square, dest: Square, promoted: PieceKind) -> Move {
        Move(Move::quiet(source, dest).0 | PROMO_BIT | promo_bits(promoted))
    }

    pub fn promotion_capture(source: Square, dest: Square, promoted: PieceKind) -> Move {
        Move(Move::promotion(source, dest, promoted).0 | CAPTURE_BIT)
    }

    /// Re-tags a promotion move with a different promotion piece, keeping
    /// everything else intact. Panics if this move is not a promotion.
    pub fn with_promotion(self, promoted: PieceKind) -> Move {
        assert!(self.is_promotion());
        Move(self.0 & !(SPECIAL_0_BIT | SPECIAL_1_BIT) | promo_bits(promoted))
    }

    pub fn source(self) -> Square {
        FromPrimitive::from_u16(self.0 & SOURCE_MASK).unwrap()
    }

    pub fn destination(self) -> Square {
        FromPrimitive::from_u16((self.0 & DESTINATION_MASK) >> 6).unwrap()
    }

    /// The piece kind a promoting pawn turns into. Panics if this move is
    /// not a promotion.
    pub fn promotion_piece(self) -> PieceKind {
        assert!(self.is_promotion());
        match (self.0 >> ATTR_SHIFT) & 3 {
            0 => PieceKind::Knight,
            1 => PieceKind::Bishop,
            2 => PieceKind::Rook,
            3 => PieceKind::Queen,
            _ => unreachable!(),
        }
    }

    pub fn is_quiet(self) -> bool {
        self.0 >> ATTR_SHIFT == 0
    }

    pub fn is_capture(self) -> bool {
        self.0 & CAPTURE_BIT != 0
    }

    pub fn is_en_passant(self) -> bool {
        self.0 >> ATTR_SHIFT == 5
    }

    pub fn is_double_pawn_push(self) -> bool {
        self.0 >> ATTR_SHIFT == 1
    }

    pub fn is_promotion(self) -> bool {
        self.0 & PROMO_BIT != 0
    }

    pub fn is_kingside_castle(self) -> bool {
        self.0 >> ATTR_SHIFT == 2
    }

    pub fn is_queenside_castle(self) -> bool {
        self.0 >> ATTR_SHIFT == 3
    }

    pub fn is_castle(self) -> bool {
        self.is_kingside_castle() || self.is_queenside_castle()
    }

    /// The UCI encoding of this move: source square, destination square,
    /// and the promotion letter if there is one.
    pub fn as_uci(self) -> String {
        let mut buf = String::new();
        write!(&mut buf, "{}{}", self.source(), self.destination()).unwrap();
        if self.is_promotion() {
            write!(&mut buf, "{}", self.promotion_piece()).unwrap();
        }

        buf
    }
}

fn promo_bits(promoted: PieceKind) -> u16 {
    let bits = match promoted {
        PieceKind::Knight => 0,
        PieceKind::Bishop => 1,
        PieceKind::Rook => 2,
        PieceKind::Queen => 3,
        _ => panic!("invalid promotion piece: {}", promoted),
    };
    bits << ATTR_SHIFT
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_uci())
    }
}
