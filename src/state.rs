// Copyright 2026 the arbiter developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `GameState`, the immutable value type carrying everything needed to
//! continue a game: piece placement, side to move, castling rights, the
//! en-passant window, both clocks, the move and position histories, and the
//! derived terminal flags.
//!
//! Applying a move never mutates a state. `apply_move` clones the state,
//! runs the transition on the clone, stamps terminal flags on it, and hands
//! it back; the input state is untouched even when the call fails.
use hashbrown::HashMap;
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Write};

use crate::attacks;
use crate::board::Board;
use crate::movegen::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::outcome::{self, Status};
use crate::record::MoveRecord;
use crate::types::{CastleStatus, Color, Direction, File, Piece, PieceKind, Rank, Square};
use crate::types::{FILES, RANKS};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Possible errors that can arise when parsing a FEN string into a
/// `GameState`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece,
    InvalidSideToMove,
    InvalidCastle,
    InvalidEnPassant,
    EmptyHalfmove,
    InvalidHalfmove,
    EmptyFullmove,
    InvalidFullmove,
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenParseError::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c),
            FenParseError::UnexpectedEnd => write!(f, "unexpected end of input"),
            FenParseError::InvalidDigit => write!(f, "invalid digit in piece placement"),
            FenParseError::FileDoesNotSumToEight => write!(f, "rank does not sum to eight files"),
            FenParseError::UnknownPiece => write!(f, "unknown piece letter"),
            FenParseError::InvalidSideToMove => write!(f, "invalid side to move"),
            FenParseError::InvalidCastle => write!(f, "invalid castling rights"),
            FenParseError::InvalidEnPassant => write!(f, "invalid en passant square"),
            FenParseError::EmptyHalfmove => write!(f, "empty halfmove clock"),
            FenParseError::InvalidHalfmove => write!(f, "invalid halfmove clock"),
            FenParseError::EmptyFullmove => write!(f, "empty fullmove number"),
            FenParseError::InvalidFullmove => write!(f, "invalid fullmove number"),
        }
    }
}

impl Error for FenParseError {}

/// A caller-contract violation handed to `apply_move`. Moves passed to
/// `apply_move` are expected to come out of the engine's own legal move
/// generator; these errors only arise when that contract is broken. Every
/// rule-driven outcome (check, mate, every draw) is reported through
/// [`Status`], never as an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InvalidMoveError {
    /// The move's source square holds no piece.
    NoPieceAtSource(Square),
    /// The piece on the source square does not belong to the side to move.
    NotYourPiece(Square),
}

impl fmt::Display for InvalidMoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvalidMoveError::NoPieceAtSource(sq) => write!(f, "no piece on source square {}", sq),
            InvalidMoveError::NotYourPiece(sq) => {
                write!(f, "piece on {} does not belong to the side to move", sq)
            }
        }
    }
}

impl Error for InvalidMoveError {}

/// A complete game position plus the history needed for repetition and
/// fifty-move accounting. Immutable: every applied move produces a new
/// `GameState` value.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    castle_status: CastleStatus,
    en_passant_square: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    move_history: Vec<String>,
    position_history: HashMap<String, u32>,
    status: Status,
}

//
// Construction and getters
//

impl GameState {
    /// The standard initial position: all castling rights, empty histories,
    /// White to move.
    pub fn new() -> GameState {
        GameState::from_fen(START_FEN).expect("start position FEN must parse")
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// The minimal notation tags of every move applied so far, oldest first.
    pub fn move_history(&self) -> &[String] {
        &self.move_history
    }

    /// The terminal flags of this state, as stamped by the terminal
    /// condition evaluator after the last applied move.
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        match color {
            Color::White => self.castle_status.contains(CastleStatus::WHITE_KINGSIDE),
            Color::Black => self.castle_status.contains(CastleStatus::BLACK_KINGSIDE),
        }
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        match color {
            Color::White => self.castle_status.contains(CastleStatus::WHITE_QUEENSIDE),
            Color::Black => self.castle_status.contains(CastleStatus::BLACK_QUEENSIDE),
        }
    }

    /// How many times the current position has been reached by an applied
    /// move. The count is cumulative over the whole game and keys on
    /// placement, side to move, castling rights, and the en-passant window
    /// only.
    pub fn repetitions(&self) -> u32 {
        self.position_history
            .get(&self.position_key())
            .copied()
            .unwrap_or(0)
    }

    /// Whether the given color's king is attacked. Returns `false` when
    /// that color has no king on the board.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.board.kings(color).first() {
            Some(king) => self.board.is_attacked(color.toggle(), king),
            None => false,
        }
    }

    /// The full set of legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveVec {
        MoveGenerator::new().legal_moves(self)
    }

    /// The legal moves originating from a single square; empty when the
    /// square does not hold a piece of the side to move.
    pub fn legal_moves_from(&self, square: Square) -> MoveVec {
        MoveGenerator::new().legal_moves_from(self, square)
    }

    /// A record of the most recently applied move for the persistence
    /// boundary, or `None` before the first move.
    pub fn last_record(&self) -> Option<MoveRecord> {
        let notation = self.move_history.last()?.clone();
        Some(MoveRecord {
            notation,
            side_to_move: self.side_to_move,
            fullmove_number: self.fullmove_number,
        })
    }
}

//
// Move application
//

impl GameState {
    /// Applies a legal move, producing the successor state with terminal
    /// flags fully recomputed.
    ///
    /// `mov` must be a move previously produced by this state's legal move
    /// generator; legality is not re-checked here. A `preferred_promotion`
    /// re-tags a promotion move with the caller's piece choice; when absent
    /// the move's own tag (queen, as produced by the generator) stands.
    /// King and pawn are never valid promotion choices and fall back to
    /// queen.
    pub fn apply_move(
        &self,
        mov: Move,
        preferred_promotion: Option<PieceKind>,
    ) -> Result<GameState, InvalidMoveError> {
        let piece = self
            .board
            .piece_at(mov.source())
            .ok_or_else(|| InvalidMoveError::NoPieceAtSource(mov.source()))?;
        if piece.color != self.side_to_move {
            return Err(InvalidMoveError::NotYourPiece(mov.source()));
        }

        let mov = if mov.is_promotion() {
            match preferred_promotion {
                Some(PieceKind::King) | Some(PieceKind::Pawn) => mov.with_promotion(PieceKind::Queen),
                Some(kind) => mov.with_promotion(kind),
                None => mov,
            }
        } else {
            mov
        };

        let tag = self.notation_tag(mov);
        let mut next = self.clone();
        next.transition(mov);
        next.move_history.push(tag.clone());
        next.status = outcome::evaluate(&next);
        debug!("{} played {} ({})", self.side_to_move, tag, mov);
        Ok(next)
    }

    /// Clone-and-transition without notation or terminal evaluation, used
    /// by the legality filter to test candidate moves. Running the
    /// evaluator here would recurse back into move generation.
    pub(crate) fn speculate(&self, mov: Move) -> GameState {
        let mut next = self.clone();
        next.transition(mov);
        next
    }

    /// The state transition itself: board update, castling-rights
    /// maintenance, en-passant window, clocks, turn flip, and
    /// position-history bookkeeping. Terminal flags are not touched.
    fn transition(&mut self, mov: Move) {
        let us = self.side_to_move;
        let them = us.toggle();
        let moving_piece = self
            .board
            .piece_at(mov.source())
            .expect("transition: no piece on source square");

        if mov.is_capture() {
            // For en passant the captured pawn does not sit on the move's
            // destination; it sits directly behind it from the mover's
            // point of view.
            let target_square = if mov.is_en_passant() {
                let ep = self
                    .en_passant_square
                    .expect("transition: en passant without a target square");
                ep.towards(pawn_retreat_direction(us))
            } else {
                mov.destination()
            };

            self.board
                .remove_piece(target_square)
                .expect("transition: no piece on capture target");

            // Capturing a rook sitting on its home square revokes the
            // corresponding right for the victim.
            if target_square == rook_home(them, CastleSide::Kingside) {
                self.castle_status &= !castle_mask(them, CastleSide::Kingside);
            } else if target_square == rook_home(them, CastleSide::Queenside) {
                self.castle_status &= !castle_mask(them, CastleSide::Queenside);
            }
        }

        if mov.is_castle() {
            // A castle is encoded as the king's move; the rook hops over
            // here as part of the same transition.
            let side = if mov.is_kingside_castle() {
                CastleSide::Kingside
            } else {
                CastleSide::Queenside
            };
            let hop = match side {
                CastleSide::Kingside => mov.destination().towards(Direction::West),
                CastleSide::Queenside => mov.destination().towards(Direction::East),
            };
            let rook = self
                .board
                .remove_piece(rook_home(us, side))
                .expect("transition: castle without a rook on its home square");
            self.board
                .add_piece(hop, rook)
                .expect("transition: rook hop square occupied");
        }

        let placed = if mov.is_promotion() {
            Piece::new(mov.promotion_piece(), us)
        } else {
            moving_piece
        };
        self.board
            .remove_piece(mov.source())
            .expect("transition: source square emptied unexpectedly");
        self.board
            .add_piece(mov.destination(), placed)
            .expect("transition: destination square occupied");

        // The en-passant window lasts exactly one ply.
        self.en_passant_square = if mov.is_double_pawn_push() {
            Some(mov.destination().towards(pawn_retreat_direction(us)))
        } else {
            None
        };

        // Rights are monotonic: a king move clears both, a rook leaving its
        // home square clears that side's.
        match moving_piece.kind {
            PieceKind::King => {
                self.castle_status &= !(castle_mask(us, CastleSide::Kingside)
                    | castle_mask(us, CastleSide::Queenside));
            }
            PieceKind::Rook if mov.source() == rook_home(us, CastleSide::Kingside) => {
                self.castle_status &= !castle_mask(us, CastleSide::Kingside);
            }
            PieceKind::Rook if mov.source() == rook_home(us, CastleSide::Queenside) => {
                self.castle_status &= !castle_mask(us, CastleSide::Queenside);
            }
            _ => {}
        }

        if moving_piece.kind == PieceKind::Pawn || mov.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if us == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = them;

        let key = self.position_key();
        *self.position_history.entry(key).or_insert(0) += 1;
    }

    /// The minimal notation tag appended to the move history: a lightweight
    /// identifier, not a disambiguation-complete SAN string. Castles are
    /// `O-O`/`O-O-O`; pawn moves are the destination (plus the origin file
    /// and an `x` on captures); piece moves are the piece letter, `x` or
    /// `-`, and the destination. Promotions append `=<letter>`.
    fn notation_tag(&self, mov: Move) -> String {
        if mov.is_kingside_castle() {
            return "O-O".to_owned();
        }
        if mov.is_queenside_castle() {
            return "O-O-O".to_owned();
        }

        let piece = self
            .board
            .piece_at(mov.source())
            .expect("notation: no piece on source square");
        let mut tag = String::new();
        if piece.kind == PieceKind::Pawn {
            if mov.is_capture() {
                write!(&mut tag, "{}x", mov.source().file()).unwrap();
            }
        } else {
            let letter = piece.kind.as_char().to_ascii_uppercase();
            tag.push(letter);
            tag.push(if mov.is_capture() { 'x' } else { '-' });
        }

        write!(&mut tag, "{}", mov.destination()).unwrap();
        if mov.is_promotion() {
            write!(
                &mut tag,
                "={}",
                mov.promotion_piece().as_char().to_ascii_uppercase()
            )
            .unwrap();
        }

        tag
    }
}

//
// Position keys, FEN parsing and generation
//

impl GameState {
    /// The canonical repetition key of this position: FEN-style placement,
    /// side to move, castling code, and en-passant target. The clocks are
    /// deliberately excluded; repetition is defined by reachable-position
    /// equivalence, not move-count context.
    pub fn position_key(&self) -> String {
        let mut buf = String::new();
        for &rank in RANKS.iter().rev() {
            let mut empty_run = 0;
            for &file in &FILES {
                match self.board.piece_at(Square::of(rank, file)) {
                    Some(piece) => {
                        if empty_run != 0 {
                            write!(&mut buf, "{}", empty_run).unwrap();
                            empty_run = 0;
                        }
                        buf.push(piece.as_char());
                    }
                    None => empty_run += 1,
                }
            }

            if empty_run != 0 {
                write!(&mut buf, "{}", empty_run).unwrap();
            }
            if rank != Rank::One {
                buf.push('/');
            }
        }

        write!(&mut buf, " {} ", self.side_to_move).unwrap();
        if self.castle_status == CastleStatus::NONE {
            buf.push('-');
        } else {
            if self.can_castle_kingside(Color::White) {
                buf.push('K');
            }
            if self.can_castle_queenside(Color::White) {
                buf.push('Q');
            }
            if self.can_castle_kingside(Color::Black) {
                buf.push('k');
            }
            if self.can_castle_queenside(Color::Black) {
                buf.push('q');
            }
        }

        match self.en_passant_square {
            Some(sq) => write!(&mut buf, " {}", sq).unwrap(),
            None => buf.push_str(" -"),
        }

        buf
    }

    /// The full FEN of this position: the position key plus both clocks.
    pub fn as_fen(&self) -> String {
        format!(
            "{} {} {}",
            self.position_key(),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Parses a FEN string into a `GameState` with empty histories and
    /// freshly evaluated terminal flags.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<GameState, FenParseError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn peek(iter: &mut Stream) -> Result<char, FenParseError> {
            iter.peek().copied().ok_or(FenParseError::UnexpectedEnd)
        }

        fn eat(iter: &mut Stream, expected: char) -> Result<(), FenParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(FenParseError::UnexpectedChar(c)),
                None => Err(FenParseError::UnexpectedEnd),
            }
        }

        fn eat_placement(iter: &mut Stream, board: &mut Board) -> Result<(), FenParseError> {
            for &rank in RANKS.iter().rev() {
                let mut file = 0usize;
                while file <= 7 {
                    let c = peek(iter)?;
                    if let Some(digit) = c.to_digit(10) {
                        if digit < 1 || digit > 8 {
                            return Err(FenParseError::InvalidDigit);
                        }

                        file += digit as usize;
                        if file > 8 {
                            return Err(FenParseError::FileDoesNotSumToEight);
                        }

                        iter.next();
                        continue;
                    }

                    let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece)?;
                    let square = Square::of(rank, FILES[file]);
                    board
                        .add_piece(square, piece)
                        .expect("FEN placement added a piece twice");
                    iter.next();
                    file += 1;
                }

                if rank != Rank::One {
                    eat(iter, '/')?;
                }
            }

            Ok(())
        }

        fn eat_side_to_move(iter: &mut Stream) -> Result<Color, FenParseError> {
            let side = match peek(iter)? {
                'w' => Color::White,
                'b' => Color::Black,
                _ => return Err(FenParseError::InvalidSideToMove),
            };
            iter.next();
            Ok(side)
        }

        fn eat_castle_status(iter: &mut Stream) -> Result<CastleStatus, FenParseError> {
            if peek(iter)? == '-' {
                iter.next();
                return Ok(CastleStatus::NONE);
            }

            let mut status = CastleStatus::NONE;
            for _ in 0..4 {
                match peek(iter)? {
                    'K' => status |= CastleStatus::WHITE_KINGSIDE,
                    'Q' => status |= CastleStatus::WHITE_QUEENSIDE,
                    'k' => status |= CastleStatus::BLACK_KINGSIDE,
                    'q' => status |= CastleStatus::BLACK_QUEENSIDE,
                    ' ' => break,
                    _ => return Err(FenParseError::InvalidCastle),
                }
                iter.next();
            }

            Ok(status)
        }

        fn eat_en_passant(iter: &mut Stream) -> Result<Option<Square>, FenParseError> {
            let c = peek(iter)?;
            if c == '-' {
                iter.next();
                return Ok(None);
            }

            let file = File::try_from(c).map_err(|_| FenParseError::InvalidEnPassant)?;
            iter.next();
            let rank =
                Rank::try_from(peek(iter)?).map_err(|_| FenParseError::InvalidEnPassant)?;
            iter.next();
            Ok(Some(Square::of(rank, file)))
        }

        fn eat_clock(
            iter: &mut Stream,
            empty: FenParseError,
            invalid: FenParseError,
        ) -> Result<u32, FenParseError> {
            let mut buf = String::new();
            while let Some(c) = iter.peek() {
                if !c.is_digit(10) {
                    break;
                }

                buf.push(*c);
                iter.next();
            }

            if buf.is_empty() {
                return Err(empty);
            }

            buf.parse::<u32>().map_err(|_| invalid)
        }

        let str_ref = fen.as_ref();
        let iter = &mut str_ref.chars().peekable();

        let mut board = Board::empty();
        eat_placement(iter, &mut board)?;
        eat(iter, ' ')?;
        let side_to_move = eat_side_to_move(iter)?;
        eat(iter, ' ')?;
        let castle_status = eat_castle_status(iter)?;
        eat(iter, ' ')?;
        let en_passant_square = eat_en_passant(iter)?;
        eat(iter, ' ')?;
        let halfmove_clock = eat_clock(
            iter,
            FenParseError::EmptyHalfmove,
            FenParseError::InvalidHalfmove,
        )?;
        eat(iter, ' ')?;
        let fullmove_number = eat_clock(
            iter,
            FenParseError::EmptyFullmove,
            FenParseError::InvalidFullmove,
        )?;

        let mut state = GameState {
            board,
            side_to_move,
            castle_status,
            en_passant_square,
            halfmove_clock,
            fullmove_number,
            move_history: Vec::new(),
            position_history: HashMap::new(),
            status: Status::default(),
        };
        state.status = outcome::evaluate(&state);
        Ok(state)
    }

    /// Resolves the UCI encoding of a move ("e2e4", "e7e8q") against this
    /// position, classifying it as the right move category. Returns `None`
    /// when the string cannot denote a move in this position; legality is
    /// not checked.
    pub fn move_from_uci(&self, move_str: &str) -> Option<Move> {
        let chars: Vec<_> = move_str.chars().collect();
        if chars.len() < 4 || chars.len() > 5 {
            return None;
        }

        let source = Square::of(
            Rank::try_from(chars[1]).ok()?,
            File::try_from(chars[0]).ok()?,
        );
        let dest = Square::of(
            Rank::try_from(chars[3]).ok()?,
            File::try_from(chars[2]).ok()?,
        );
        let promotion = match chars.get(4) {
            Some('n') => Some(PieceKind::Knight),
            Some('b') => Some(PieceKind::Bishop),
            Some('r') => Some(PieceKind::Rook),
            Some('q') => Some(PieceKind::Queen),
            Some(_) => return None,
            None => None,
        };

        let moving_piece = self.board.piece_at(source)?;
        let is_capture = self.board.piece_at(dest).is_some();

        if moving_piece.kind == PieceKind::Pawn {
            let push = pawn_push_direction(moving_piece.color);
            let (start_rank, promo_rank) = match moving_piece.color {
                Color::White => (Rank::Two, Rank::Eight),
                Color::Black => (Rank::Seven, Rank::One),
            };

            if source.rank() == start_rank && source.towards(push).towards(push) == dest {
                return Some(Move::double_pawn_push(source, dest));
            }

            if attacks::pawn_attacks(source, moving_piece.color).test(dest) {
                if dest.rank() == promo_rank {
                    return Some(Move::promotion_capture(source, dest, promotion?));
                }
                if Some(dest) == self.en_passant_square {
                    return Some(Move::en_passant(source, dest));
                }
                if is_capture {
                    return Some(Move::capture(source, dest));
                }
                return None;
            }

            if dest.rank() == promo_rank {
                return Some(Move::promotion(source, dest, promotion?));
            }

            return Some(Move::quiet(source, dest));
        }

        if moving_piece.kind == PieceKind::King {
            let (king_home, kingside_dest, queenside_dest) = match moving_piece.color {
                Color::White => (Square::E1, Square::G1, Square::C1),
                Color::Black => (Square::E8, Square::G8, Square::C8),
            };

            if source == king_home {
                if dest == kingside_dest {
                    return Some(Move::kingside_castle(source, dest));
                }
                if dest == queenside_dest {
                    return Some(Move::queenside_castle(source, dest));
                }
            }
        }

        if is_capture {
            Some(Move::capture(source, dest))
        } else {
            Some(Move::quiet(source, dest))
        }
    }
}

impl Default for GameState {
    fn default() -> GameState {
        GameState::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

//
// Castling geometry helpers
//

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum CastleSide {
    Kingside,
    Queenside,
}

pub(crate) fn rook_home(color: Color, side: CastleSide) -> Square {
    match (color, side) {
        (Color::White, CastleSide::Kingside) => Square::H1,
        (Color::White, CastleSide::Queenside) => Square::A1,
        (Color::Black, CastleSide::Kingside) => Square::H8,
        (Color::Black, CastleSide::Queenside) => Square::A8,
    }
}

fn castle_mask(color: Color, side: CastleSide) -> CastleStatus {
    match (color, side) {
        (Color::White, CastleSide::Kingside) => CastleStatus::WHITE_KINGSIDE,
        (Color::White, CastleSide::Queenside) => CastleStatus::WHITE_QUEENSIDE,
        (Color::Black, CastleSide::Kingside) => CastleStatus::BLACK_KINGSIDE,
        (Color::Black, CastleSide::Queenside) => CastleStatus::BLACK_QUEENSIDE,
    }
}

/// The direction a pawn of `color` advances.
pub(crate) fn pawn_push_direction(color: Color) -> Direction {
    match color {
        Color::White => Direction::North,
        Color::Black => Direction::South,
    }
}

/// The direction "behind" a pawn of `color`; where an en-passant victim
/// stands relative to the target square.
pub(crate) fn pawn_retreat_direction(color: Color) -> Direction {
    match color {
        Color::White => Direction::South,
        Color::Black => Direction::North,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKind, Square};

    #[test]
    fn start_position_fields() {
        let state = GameState::new();
        assert_eq!(Color::White, state.side_to_move());
        assert!(state.can_castle_kingside(Color::White));
        assert!(state.can_castle_queenside(Color::White));
        assert!(state.can_castle_kingside(Color::Black));
        assert!(state.can_castle_queenside(Color::Black));
        assert_eq!(None, state.en_passant_square());
        assert_eq!(0, state.halfmove_clock());
        assert_eq!(1, state.fullmove_number());
        assert!(state.move_history().is_empty());
        assert!(!state.status().is_game_over());
    }

    #[test]
    fn fen_round_trip() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 12 40",
            "8/8/8/3pP3/8/8/8/8 w - d6 0 1",
        ];
        for &fen in &fens {
            let state = GameState::from_fen(fen).unwrap();
            assert_eq!(fen, state.as_fen());
        }
    }

    #[test]
    fn position_key_excludes_clocks() {
        let a = GameState::from_fen("8/8/8/8/8/8/4K3/7k w - - 0 1").unwrap();
        let b = GameState::from_fen("8/8/8/8/8/8/4K3/7k w - - 33 80").unwrap();
        assert_eq!(a.position_key(), b.position_key());
        assert_ne!(a.as_fen(), b.as_fen());
    }

    #[test]
    fn fen_error_cases() {
        let cases: [(&str, FenParseError); 8] = [
            ("", FenParseError::UnexpectedEnd),
            ("z7/8/8/8/8/8/8/8 w - - 0 1", FenParseError::UnknownPiece),
            ("9/8/8/8/8/8/8/8 w - - 0 1", FenParseError::InvalidDigit),
            (
                "pppp6/8/8/8/8/8/8/8 w - - 0 1",
                FenParseError::FileDoesNotSumToEight,
            ),
            ("8/8/8/8/8/8/8/8 c - - 0 1", FenParseError::InvalidSideToMove),
            ("8/8/8/8/8/8/8/8 w x - 0 1", FenParseError::InvalidCastle),
            ("8/8/8/8/8/8/8/8 w - 99 0 1", FenParseError::InvalidEnPassant),
            ("8/8/8/8/8/8/8/8 w - - q 1", FenParseError::EmptyHalfmove),
        ];

        for &(fen, expected) in &cases {
            assert_eq!(expected, GameState::from_fen(fen).unwrap_err(), "{}", fen);
        }
    }

    #[test]
    fn apply_rejects_empty_source() {
        let state = GameState::new();
        let err = state
            .apply_move(Move::quiet(Square::E4, Square::E5), None)
            .unwrap_err();
        assert_eq!(InvalidMoveError::NoPieceAtSource(Square::E4), err);
        // The original state is untouched.
        assert_eq!(Color::White, state.side_to_move());
    }

    #[test]
    fn apply_rejects_wrong_color() {
        let state = GameState::new();
        let err = state
            .apply_move(Move::quiet(Square::E7, Square::E6), None)
            .unwrap_err();
        assert_eq!(InvalidMoveError::NotYourPiece(Square::E7), err);
    }

    #[test]
    fn apply_is_copy_on_write() {
        let state = GameState::new();
        let next = state
            .apply_move(Move::double_pawn_push(Square::E2, Square::E4), None)
            .unwrap();

        assert_eq!(Color::White, state.side_to_move());
        assert!(state.board().piece_at(Square::E4).is_none());
        assert_eq!(Color::Black, next.side_to_move());
        assert!(next.board().piece_at(Square::E4).is_some());
        assert_eq!(Some(Square::E3), next.en_passant_square());
        assert!(state.move_history().is_empty());
        assert_eq!(&["e4".to_owned()], next.move_history());
    }

    #[test]
    fn halfmove_and_fullmove_clocks() {
        let state = GameState::from_fen("8/8/8/8/8/8/4B2k/K7 w - - 5 12").unwrap();
        let next = state
            .apply_move(Move::quiet(Square::E2, Square::G4), None)
            .unwrap();
        assert_eq!(6, next.halfmove_clock());
        assert_eq!(12, next.fullmove_number());

        let after_black = next
            .apply_move(Move::quiet(Square::H2, Square::H1), None)
            .unwrap();
        assert_eq!(7, after_black.halfmove_clock());
        assert_eq!(13, after_black.fullmove_number());
    }

    #[test]
    fn capture_resets_halfmove_clock() {
        let state = GameState::from_fen("7k/8/8/3p4/8/3R4/8/K7 w - - 30 50").unwrap();
        let next = state
            .apply_move(Move::capture(Square::D3, Square::D5), None)
            .unwrap();
        assert_eq!(0, next.halfmove_clock());
    }

    #[test]
    fn en_passant_capture_removes_victim() {
        let state = GameState::from_fen("7k/8/8/3pP3/8/8/8/K7 w - d6 0 1").unwrap();
        let next = state
            .apply_move(Move::en_passant(Square::E5, Square::D6), None)
            .unwrap();

        assert!(next.board().piece_at(Square::D5).is_none());
        let pawn = next.board().piece_at(Square::D6).unwrap();
        assert_eq!(PieceKind::Pawn, pawn.kind);
        assert_eq!(Color::White, pawn.color);
        assert_eq!(0, next.halfmove_clock());
        assert_eq!(&["exd6".to_owned()], next.move_history());
    }

    #[test]
    fn king_move_clears_both_rights() {
        let state = GameState::from_fen("7k/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let next = state
            .apply_move(Move::quiet(Square::E1, Square::E2), None)
            .unwrap();
        assert!(!next.can_castle_kingside(Color::White));
        assert!(!next.can_castle_queenside(Color::White));
    }

    #[test]
    fn rook_move_clears_single_right() {
        let state = GameState::from_fen("7k/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let next = state
            .apply_move(Move::quiet(Square::H1, Square::H4), None)
            .unwrap();
        assert!(!next.can_castle_kingside(Color::White));
        assert!(next.can_castle_queenside(Color::White));
    }

    #[test]
    fn rook_capture_on_home_square_clears_right() {
        let state = GameState::from_fen("7k/8/8/8/8/7r/8/R3K2R b KQ - 0 1").unwrap();
        let next = state
            .apply_move(Move::capture(Square::H3, Square::H1), None)
            .unwrap();
        assert!(!next.can_castle_kingside(Color::White));
        assert!(next.can_castle_queenside(Color::White));
    }

    #[test]
    fn kingside_castle_relocates_rook() {
        let state = GameState::from_fen("7k/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let next = state
            .apply_move(Move::kingside_castle(Square::E1, Square::G1), None)
            .unwrap();

        assert_eq!(PieceKind::King, next.board().piece_at(Square::G1).unwrap().kind);
        assert_eq!(PieceKind::Rook, next.board().piece_at(Square::F1).unwrap().kind);
        assert!(next.board().piece_at(Square::H1).is_none());
        assert_eq!(&["O-O".to_owned()], next.move_history());
    }

    #[test]
    fn queenside_castle_relocates_rook() {
        let state = GameState::from_fen("7k/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        let next = state
            .apply_move(Move::queenside_castle(Square::E1, Square::C1), None)
            .unwrap();

        assert_eq!(PieceKind::King, next.board().piece_at(Square::C1).unwrap().kind);
        assert_eq!(PieceKind::Rook, next.board().piece_at(Square::D1).unwrap().kind);
        assert!(next.board().piece_at(Square::A1).is_none());
        assert_eq!(&["O-O-O".to_owned()], next.move_history());
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let state = GameState::from_fen("7k/4P3/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let mov = Move::promotion(Square::E7, Square::E8, PieceKind::Queen);
        let next = state.apply_move(mov, None).unwrap();
        assert_eq!(PieceKind::Queen, next.board().piece_at(Square::E8).unwrap().kind);
        assert_eq!(&["e8=Q".to_owned()], next.move_history());
    }

    #[test]
    fn promotion_honors_preference() {
        let state = GameState::from_fen("7k/4P3/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let mov = Move::promotion(Square::E7, Square::E8, PieceKind::Queen);
        let next = state.apply_move(mov, Some(PieceKind::Knight)).unwrap();
        assert_eq!(PieceKind::Knight, next.board().piece_at(Square::E8).unwrap().kind);
        assert_eq!(&["e8=N".to_owned()], next.move_history());
    }

    #[test]
    fn promotion_never_yields_a_king() {
        let state = GameState::from_fen("7k/4P3/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let mov = Move::promotion(Square::E7, Square::E8, PieceKind::Queen);
        let next = state.apply_move(mov, Some(PieceKind::King)).unwrap();
        assert_eq!(PieceKind::Queen, next.board().piece_at(Square::E8).unwrap().kind);
    }

    #[test]
    fn notation_tags() {
        let state = GameState::new();
        let next = state
            .apply_move(Move::quiet(Square::G1, Square::F3), None)
            .unwrap();
        assert_eq!(&["N-f3".to_owned()], next.move_history());

        let capture_state =
            GameState::from_fen("7k/8/8/3p4/8/3R4/8/K7 w - - 0 1").unwrap();
        let capture = capture_state
            .apply_move(Move::capture(Square::D3, Square::D5), None)
            .unwrap();
        assert_eq!(&["Rxd5".to_owned()], capture.move_history());
    }

    #[test]
    fn last_record_reflects_latest_move() {
        let state = GameState::new();
        assert!(state.last_record().is_none());

        let next = state
            .apply_move(Move::double_pawn_push(Square::E2, Square::E4), None)
            .unwrap();
        let record = next.last_record().unwrap();
        assert_eq!("e4", record.notation);
        assert_eq!(Color::Black, record.side_to_move);
        assert_eq!(1, record.fullmove_number);
    }

    #[test]
    fn uci_move_resolution() {
        let state = GameState::new();
        assert_eq!(
            Some(Move::double_pawn_push(Square::E2, Square::E4)),
            state.move_from_uci("e2e4")
        );
        assert_eq!(
            Some(Move::quiet(Square::G1, Square::F3)),
            state.move_from_uci("g1f3")
        );
        assert_eq!(None, state.move_from_uci("zzzz"));
        assert_eq!(None, state.move_from_uci("e2"));

        let castle_state = GameState::from_fen("7k/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert_eq!(
            Some(Move::kingside_castle(Square::E1, Square::G1)),
            castle_state.move_from_uci("e1g1")
        );

        let promo_state = GameState::from_fen("7k/4P3/8/8/8/8/8/K7 w - - 0 1").unwrap();
        assert_eq!(
            Some(Move::promotion(Square::E7, Square::E8, PieceKind::Rook)),
            promo_state.move_from_uci("e7e8r")
        );
        // A promotion push without a piece letter is not a valid encoding.
        assert_eq!(None, promo_state.move_from_uci("e7e8"));
    }
}
