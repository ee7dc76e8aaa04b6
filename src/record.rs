// Copyright 2026 the arbiter developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The serializable summary of an applied move, handed across the
//! persistence boundary. A record captures the move's notation tag and the
//! resulting turn state; consumers store or transmit it without needing the
//! engine's internal move encoding.
use crate::types::Color;

/// A summary of the most recently applied move, as produced by
/// `GameState::last_record`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    /// The minimal notation tag of the move, e.g. `e4`, `Nxd5`, `O-O`,
    /// `e8=Q`.
    pub notation: String,
    /// The side to move after the move was applied.
    pub side_to_move: Color,
    /// The fullmove number after the move was applied.
    pub fullmove_number: u32,
}
