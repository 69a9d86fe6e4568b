//! Knight move generation: an L-shape jump to a single destination.
//! Intermediate-square blockage never applies — knights jump (spec.md
//! §4.2) — but the destination still can't hold the mover's own piece,
//! and the future-path conflict rule still applies.

use super::{is_blocked_for_jump, PathResult};
use crate::piece::{Coord, Piece};
use crate::state::GameState;

pub(super) fn generate(state: &GameState, piece: &Piece, to_row: Coord, to_col: Coord) -> Option<PathResult> {
    let dr = (to_row - piece.row).abs();
    let dc = (to_col - piece.col).abs();
    if !((dr == 2 && dc == 1) || (dr == 1 && dc == 2)) {
        return None;
    }
    if is_blocked_for_jump(state, piece, (to_row, to_col)) {
        return None;
    }
    Some(PathResult::simple(vec![(piece.row, piece.col), (to_row, to_col)]))
}
