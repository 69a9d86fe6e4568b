//! Bishop move generation: a diagonal ray, start to end inclusive.

use super::{is_blocked, ray_path, PathResult};
use crate::piece::{Coord, Piece};
use crate::state::GameState;

pub(super) fn generate(state: &GameState, piece: &Piece, to_row: Coord, to_col: Coord) -> Option<PathResult> {
    let path = ray_path((piece.row, piece.col), (to_row, to_col))?;
    let (dr, dc) = (to_row - piece.row, to_col - piece.col);
    if dr == 0 || dc == 0 || dr.abs() != dc.abs() {
        return None;
    }
    if is_blocked(state, piece, &path) {
        return None;
    }
    Some(PathResult::simple(path))
}
