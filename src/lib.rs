// Copyright 2026 the arbiter developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `arbiter` is a chess rules engine. It knows how to enumerate the legal
//! moves of a position, apply a chosen move to produce the successor
//! position, and classify terminal conditions: check, checkmate, stalemate,
//! and every draw category (repetition, fifty-move rule, insufficient
//! material).
//!
//! The engine is deliberately stateless. [`GameState`] is an immutable value;
//! applying a move never mutates the input state, it produces a brand-new
//! one with terminal flags already stamped. Callers that keep each state on
//! its own thread need no synchronization at all.
#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod attacks;
mod bitboard;
mod board;
mod movegen;
mod moves;
mod outcome;
mod perft;
mod record;
mod state;
mod types;

pub use crate::bitboard::{Bitboard, BitboardIterator};
pub use crate::board::Board;
pub use crate::movegen::{MoveGenerator, MoveVec};
pub use crate::moves::Move;
pub use crate::outcome::Status;
pub use crate::perft::perft;
pub use crate::record::MoveRecord;
pub use crate::state::{FenParseError, GameState, InvalidMoveError};
pub use crate::types::{CastleStatus, Color, Direction, File, Piece, PieceKind, Rank, Square};
