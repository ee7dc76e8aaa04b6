// Copyright 2026 the arbiter developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Attack lookups for every piece kind. Leaper attacks (pawn, knight, king)
//! come straight out of precomputed per-square tables; slider attacks (rook,
//! bishop, queen) are classic ray lookups where the first occupied square
//! along a ray truncates it.
//!
//! Everything in this module answers "which squares does a piece of this
//! kind standing on `sq` attack", given board occupancy. It knows nothing
//! about move legality or check.
use crate::bitboard::Bitboard;
use crate::bitboard::{
    BB_FILE_A, BB_FILE_AB, BB_FILE_GH, BB_FILE_H, BB_RANK_1, BB_RANK_12, BB_RANK_78, BB_RANK_8,
};
use crate::types::{Color, Direction, Square, TableIndex, COLORS, SQUARES};

struct AttackTables {
    king: [Bitboard; 64],
    knight: [Bitboard; 64],
    pawn: [[Bitboard; 2]; 64],
    // Index 64 is a deliberately empty sentinel entry, used when a ray scan
    // finds no blocker.
    rays: [[Bitboard; 8]; 65],
}

impl AttackTables {
    fn new() -> AttackTables {
        let mut tables = AttackTables {
            king: [Bitboard::none(); 64],
            knight: [Bitboard::none(); 64],
            pawn: [[Bitboard::none(); 2]; 64],
            rays: [[Bitboard::none(); 8]; 65],
        };

        for &sq in SQUARES.iter() {
            tables.king[sq.as_index()] = king_attacks_slow(sq);
            tables.knight[sq.as_index()] = knight_attacks_slow(sq);
            for &color in COLORS.iter() {
                tables.pawn[sq.as_index()][color.as_index()] = pawn_attacks_slow(sq, color);
            }

            let mut populate = |dir: Direction, edge: Bitboard| {
                let mut ray = Bitboard::none();
                let mut cursor = sq;
                while !edge.test(cursor) {
                    cursor = cursor.towards(dir);
                    ray.set(cursor);
                }
                tables.rays[sq.as_index()][dir.as_index()] = ray;
            };

            populate(Direction::North, BB_RANK_8);
            populate(Direction::NorthEast, BB_RANK_8.or(BB_FILE_H));
            populate(Direction::East, BB_FILE_H);
            populate(Direction::SouthEast, BB_RANK_1.or(BB_FILE_H));
            populate(Direction::South, BB_RANK_1);
            populate(Direction::SouthWest, BB_RANK_1.or(BB_FILE_A));
            populate(Direction::West, BB_FILE_A);
            populate(Direction::NorthWest, BB_RANK_8.or(BB_FILE_A));
        }

        tables
    }
}

fn king_attacks_slow(sq: Square) -> Bitboard {
    let mut board = Bitboard::none();
    if !BB_RANK_8.test(sq) {
        board.set(sq.plus(8));
        if !BB_FILE_A.test(sq) {
            board.set(sq.plus(7));
        }
        if !BB_FILE_H.test(sq) {
            board.set(sq.plus(9));
        }
    }

    if !BB_RANK_1.test(sq) {
        board.set(sq.plus(-8));
        if !BB_FILE_A.test(sq) {
            board.set(sq.plus(-9));
        }
        if !BB_FILE_H.test(sq) {
            board.set(sq.plus(-7));
        }
    }

    if !BB_FILE_A.test(sq) {
        board.set(sq.plus(-1));
    }
    if !BB_FILE_H.test(sq) {
        board.set(sq.plus(1));
    }

    board
}

fn knight_attacks_slow(sq: Square) -> Bitboard {
    let mut board = Bitboard::none();
    if !BB_FILE_A.test(sq) && !BB_RANK_78.test(sq) {
        board.set(sq.plus(15));
    }
    if !BB_FILE_H.test(sq) && !BB_RANK_78.test(sq) {
        board.set(sq.plus(17));
    }
    if !BB_FILE_GH.test(sq) && !BB_RANK_8.test(sq) {
        board.set(sq.plus(10));
    }
    if !BB_FILE_GH.test(sq) && !BB_RANK_1.test(sq) {
        board.set(sq.plus(-6));
    }
    if !BB_FILE_H.test(sq) && !BB_RANK_12.test(sq) {
        board.set(sq.plus(-15));
    }
    if !BB_FILE_A.test(sq) && !BB_RANK_12.test(sq) {
        board.set(sq.plus(-17));
    }
    if !BB_FILE_AB.test(sq) && !BB_RANK_1.test(sq) {
        board.set(sq.plus(-10));
    }
    if !BB_FILE_AB.test(sq) && !BB_RANK_8.test(sq) {
        board.set(sq.plus(6));
    }

    board
}

fn pawn_attacks_slow(sq: Square, color: Color) -> Bitboard {
    let mut board = Bitboard::none();
    let (last_rank, up_left, up_right) = match color {
        Color::White => (BB_RANK_8, 7, 9),
        Color::Black => (BB_RANK_1, -9, -7),
    };

    // A pawn on the last rank would already have promoted; it attacks
    // nothing.
    if last_rank.test(sq) {
        return board;
    }

    if !BB_FILE_A.test(sq) {
        board.set(sq.plus(up_left));
    }
    if !BB_FILE_H.test(sq) {
        board.set(sq.plus(up_right));
    }

    board
}

lazy_static! {
    static ref TABLES: AttackTables = AttackTables::new();
}

fn positive_ray_attacks(sq: Square, occupancy: Bitboard, dir: Direction) -> Bitboard {
    debug_assert!(dir.as_vector() > 0);
    let ray = TABLES.rays[sq.as_index()][dir.as_index()];
    let blockers = ray.and(occupancy).bits();
    let blocking_square = blockers.trailing_zeros() as usize;
    ray.xor(TABLES.rays[blocking_square][dir.as_index()])
}

fn negative_ray_attacks(sq: Square, occupancy: Bitboard, dir: Direction) -> Bitboard {
    debug_assert!(dir.as_vector() < 0);
    let ray = TABLES.rays[sq.as_index()][dir.as_index()];
    let blockers = ray.and(occupancy).bits();
    let blocking_square = (64 - blockers.leading_zeros())
        .checked_sub(1)
        .unwrap_or(64) as usize;
    ray.xor(TABLES.rays[blocking_square][dir.as_index()])
}

pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    TABLES.pawn[sq.as_index()][color.as_index()]
}

pub fn knight_attacks(sq: Square) -> Bitboard {
    TABLES.knight[sq.as_index()]
}

pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    positive_ray_attacks(sq, occupancy, Direction::NorthEast)
        | positive_ray_attacks(sq, occupancy, Direction::NorthWest)
        | negative_ray_attacks(sq, occupancy, Direction::SouthEast)
        | negative_ray_attacks(sq, occupancy, Direction::SouthWest)
}

pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    positive_ray_attacks(sq, occupancy, Direction::North)
        | positive_ray_attacks(sq, occupancy, Direction::East)
        | negative_ray_attacks(sq, occupancy, Direction::South)
        | negative_ray_attacks(sq, occupancy, Direction::West)
}

pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}

pub fn king_attacks(sq: Square) -> Bitboard {
    TABLES.king[sq.as_index()]
}
