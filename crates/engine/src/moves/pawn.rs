//! Pawn move generation (spec.md §4.2).
//!
//! - Forward steps: one square, or two from the initial square.
//! - Diagonal forward one square only when the target currently holds an
//!   enemy piece.
//! - A straight-moving pawn never captures — that's left entirely to the
//!   collision resolver (spec.md §4.3), which refuses straight-moving
//!   pawns capture rights but still lets them be captured.

use super::{future_path_conflict, PathResult};
use crate::board::Orientation;
use crate::piece::{Coord, Piece};
use crate::state::GameState;

pub(super) fn generate(
    state: &GameState,
    piece: &Piece,
    orientation: Orientation,
    to_row: Coord,
    to_col: Coord,
) -> Option<PathResult> {
    let (fr, fc) = orientation.forward;
    let (dr, dc) = (to_row - piece.row, to_col - piece.col);

    // `forward` is a unit step along exactly one axis. North/south-facing
    // pawns (standard board, and the north/south edges of a four-player
    // board) advance along rows with the file held constant; east/west
    // edges of a four-player board advance along columns instead — every
    // check below mirrors across whichever axis `forward` actually uses.
    let (is_diagonal, is_single_push, is_double_push) = if fr != 0 {
        (
            dc.abs() == 1 && dr == fr,
            dc == 0 && dr == fr,
            dc == 0 && dr == fr * 2 && !piece.has_moved,
        )
    } else {
        (
            dr.abs() == 1 && dc == fc,
            dr == 0 && dc == fc,
            dr == 0 && dc == fc * 2 && !piece.has_moved,
        )
    };

    if is_diagonal {
        let occupant = state.board.piece_at(to_row, to_col)?;
        if occupant.player == piece.player {
            return None;
        }
        return Some(PathResult::simple(vec![(piece.row, piece.col), (to_row, to_col)]));
    }

    if is_single_push {
        if state.board.piece_at(to_row, to_col).is_some() {
            return None;
        }
        let path = vec![(piece.row, piece.col), (to_row, to_col)];
        if future_path_conflict(state, piece, &path) {
            return None;
        }
        return Some(PathResult::simple(path));
    }

    if is_double_push {
        let mid = (piece.row + fr, piece.col + fc);
        if state.board.piece_at(mid.0, mid.1).is_some() || state.board.piece_at(to_row, to_col).is_some() {
            return None;
        }
        let path = vec![(piece.row, piece.col), mid, (to_row, to_col)];
        if future_path_conflict(state, piece, &path) {
            return None;
        }
        return Some(PathResult::simple(path));
    }

    None
}
