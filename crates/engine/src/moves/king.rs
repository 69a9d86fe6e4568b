//! King move generation: one square in any direction, plus castling
//! (spec.md §4.2).
//!
//! Castling is recognized as a two-square king intent along the player's
//! lateral axis (the axis perpendicular to their pawns' forward
//! direction — a rank on a north/south-facing player's board, a file on
//! an east/west-facing one). It is legal iff the king and the rook beyond
//! the two destination squares have never moved, the squares between them
//! are empty, and none of those squares is the target of another of the
//! mover's own active moves.

use super::{future_path_conflict, is_blocked_for_jump, PathResult};
use crate::board::orientation_for;
use crate::piece::{Coord, Piece, PieceType};
use crate::state::{ExtraMove, GameState};

pub(super) fn generate(state: &GameState, piece: &Piece, to_row: Coord, to_col: Coord) -> Option<PathResult> {
    let dr = (to_row - piece.row).abs();
    let dc = (to_col - piece.col).abs();

    if dr <= 1 && dc <= 1 && (dr != 0 || dc != 0) {
        if is_blocked_for_jump(state, piece, (to_row, to_col)) {
            return None;
        }
        return Some(PathResult::simple(vec![(piece.row, piece.col), (to_row, to_col)]));
    }

    try_castle(state, piece, to_row, to_col)
}

fn try_castle(state: &GameState, king: &Piece, to_row: Coord, to_col: Coord) -> Option<PathResult> {
    if king.has_moved {
        return None;
    }
    let orientation = orientation_for(&state.board, king.player);
    let along_rank = orientation.forward.1 == 0; // forward is purely row-wise -> lateral axis is the column
    let (dr, dc) = (to_row - king.row, to_col - king.col);

    let direction = if along_rank {
        if dr != 0 || dc.abs() != 2 {
            return None;
        }
        (0, dc.signum())
    } else {
        if dc != 0 || dr.abs() != 2 {
            return None;
        }
        (dr.signum(), 0)
    };

    let one = (king.row + direction.0, king.col + direction.1);
    let two = (king.row + direction.0 * 2, king.col + direction.1 * 2);
    debug_assert_eq!(two, (to_row, to_col));

    // Walk further in the same direction until a piece is found; it must
    // be the mover's own never-moved rook.
    let mut probe = two;
    loop {
        probe = (probe.0 + direction.0, probe.1 + direction.1);
        if !state.board.is_valid(probe.0, probe.1) {
            return None;
        }
        if let Some(occupant) = state.board.piece_at(probe.0, probe.1) {
            if occupant.player != king.player || occupant.piece_type != PieceType::Rook || occupant.has_moved {
                return None;
            }
            break;
        }
    }
    let rook = state.board.piece_at(probe.0, probe.1).unwrap();

    for square in [one, two] {
        if state.board.piece_at(square.0, square.1).is_some() {
            return None;
        }
    }

    let king_path = vec![(king.row, king.col), one, two];
    let rook_dest = one;
    let rook_path = vec![(rook.row, rook.col), rook_dest];

    if future_path_conflict(state, king, &king_path) || future_path_conflict(state, rook, &rook_path) {
        return None;
    }

    Some(PathResult {
        path: king_path,
        extra_move: Some(ExtraMove {
            piece_id: rook.id,
            path: rook_path,
        }),
    })
}
