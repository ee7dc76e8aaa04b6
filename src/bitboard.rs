// Copyright 2026 the arbiter developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A `Bitboard` is a set of squares, one bit per square of the board. The
//! board component and the attack tables are built out of bitboards; set
//! operations are single bitwise instructions.
use num_traits::FromPrimitive;
use std::fmt;
use std::ops;

use crate::types::{self, File, Rank, Square};

/// A set of squares, backed by a 64-bit integer with one bit per square.
/// Bit 0 is A1 and bit 63 is H8, matching the `Square` numbering.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    pub const fn from_bits(bits: u64) -> Bitboard {
        Bitboard { bits }
    }

    /// The full set: every square on the board.
    pub const fn all() -> Bitboard {
        Bitboard::from_bits(!0u64)
    }

    /// The empty set.
    pub const fn none() -> Bitboard {
        Bitboard::from_bits(0)
    }

    pub const fn test(self, square: Square) -> bool {
        self.bits & (1u64 << (square as u8)) != 0
    }

    pub fn set(&mut self, square: Square) {
        self.bits |= 1u64 << (square as u8);
    }

    pub fn unset(&mut self, square: Square) {
        self.bits &= !(1u64 << (square as u8));
    }

    pub const fn and(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits & other.bits)
    }

    pub const fn or(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits | other.bits)
    }

    pub const fn xor(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits ^ other.bits)
    }

    /// Restricts this set to the squares of the given rank.
    pub const fn rank(self, rank: Rank) -> Bitboard {
        self.and(Bitboard::from_bits(0xFFu64 << (8 * rank as usize)))
    }

    /// Restricts this set to the squares of the given file.
    pub const fn file(self, file: File) -> Bitboard {
        self.and(Bitboard::from_bits(0x0101_0101_0101_0101u64 << file as usize))
    }

    pub const fn bits(self) -> u64 {
        self.bits
    }

    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    pub const fn empty(self) -> bool {
        self.bits == 0
    }

    pub fn first(self) -> Option<Square> {
        self.into_iter().next()
    }

    pub fn iter(self) -> BitboardIterator {
        BitboardIterator { bits: self.bits }
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Bitboard({:#018x})", self.bits)
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in types::RANKS.iter().rev() {
            for &file in &types::FILES {
                let sq = Square::of(rank, file);
                write!(f, " {} ", if self.test(sq) { '1' } else { '.' })?;
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &types::FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for file in &types::FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl ops::BitAnd for Bitboard {
    type Output = Bitboard;

    fn bitand(self, rhs: Bitboard) -> Bitboard {
        self.and(rhs)
    }
}

impl ops::BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Bitboard) {
        *self = self.and(rhs);
    }
}

impl ops::BitOr for Bitboard {
    type Output = Bitboard;

    fn bitor(self, rhs: Bitboard) -> Bitboard {
        self.or(rhs)
    }
}

impl ops::BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Bitboard) {
        *self = self.or(rhs);
    }
}

impl ops::BitXor for Bitboard {
    type Output = Bitboard;

    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        self.xor(rhs)
    }
}

impl ops::BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        *self = self.xor(rhs);
    }
}

/// Iterator over the squares contained in a bitboard, in ascending square
/// order.
pub struct BitboardIterator {
    bits: u64,
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.bits == 0 {
            return None;
        }

        let next = self.bits.trailing_zeros();
        self.bits &= self.bits - 1;
        Some(FromPrimitive::from_u32(next).unwrap())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(64))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIterator;

    fn into_iter(self) -> BitboardIterator {
        self.iter()
    }
}

pub const BB_RANK_1: Bitboard = Bitboard::all().rank(Rank::One);
pub const BB_RANK_2: Bitboard = Bitboard::all().rank(Rank::Two);
pub const BB_RANK_7: Bitboard = Bitboard::all().rank(Rank::Seven);
pub const BB_RANK_8: Bitboard = Bitboard::all().rank(Rank::Eight);

pub const BB_FILE_A: Bitboard = Bitboard::all().file(File::A);
pub const BB_FILE_B: Bitboard = Bitboard::all().file(File::B);
pub const BB_FILE_G: Bitboard = Bitboard::all().file(File::G);
pub const BB_FILE_H: Bitboard = Bitboard::all().file(File::H);

pub const BB_FILE_AB: Bitboard = BB_FILE_A.or(BB_FILE_B);
pub const BB_FILE_GH: Bitboard = BB_FILE_G.or(BB_FILE_H);

pub const BB_RANK_12: Bitboard = BB_RANK_1.or(BB_RANK_2);
pub const BB_RANK_78: Bitboard = BB_RANK_7.or(BB_RANK_8);

/// The light squares of the board; H1 is light, A1 is dark.
pub const BB_LIGHT_SQUARES: Bitboard = Bitboard::from_bits(0x55AA_55AA_55AA_55AA);
