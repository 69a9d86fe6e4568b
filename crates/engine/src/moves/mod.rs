//! Move rules: per-piece path generation, blockage semantics, and
//! castling (spec.md §4.2).
//!
//! Dispatch is a single `candidate_path` switching on `PieceType` — see
//! the workspace design notes on tagged-variant dispatch replacing dynamic
//! piece-class polymorphism.

mod bishop;
mod king;
mod knight;
mod pawn;
mod queen;
mod rook;

use crate::board::orientation_for;
use crate::error::{MoveRejection, MoveResult};
use crate::piece::{Coord, PieceId, PieceType};
use crate::state::{ExtraMove, GameState};

/// The output of a successful `candidate_path` call: the mover's own path,
/// plus castling's simultaneous rook move when applicable.
#[derive(Debug, Clone)]
pub struct PathResult {
    pub path: Vec<(Coord, Coord)>,
    pub extra_move: Option<ExtraMove>,
}

impl PathResult {
    fn simple(path: Vec<(Coord, Coord)>) -> PathResult {
        PathResult {
            path,
            extra_move: None,
        }
    }
}

/// `candidatePath(state, piece, toRow, toCol) → path | reject(reason)`
/// (spec.md §4.2). Pure geometry: the caller is responsible for the
/// session-level checks in spec.md §4.10 (game status, ownership, piece
/// existence, busy state) before calling this.
pub fn candidate_path(
    state: &GameState,
    piece_id: PieceId,
    to_row: Coord,
    to_col: Coord,
) -> MoveResult<PathResult> {
    let piece = state.board.piece(piece_id);
    if !state.board.is_valid(to_row, to_col) {
        return Err(MoveRejection::InvalidMove);
    }

    let result = match piece.piece_type {
        PieceType::Pawn => {
            let orientation = orientation_for(&state.board, piece.player);
            pawn::generate(state, piece, orientation, to_row, to_col)
        }
        PieceType::Knight => knight::generate(state, piece, to_row, to_col),
        PieceType::Bishop => bishop::generate(state, piece, to_row, to_col),
        PieceType::Rook => rook::generate(state, piece, to_row, to_col),
        PieceType::Queen => queen::generate(state, piece, to_row, to_col),
        PieceType::King => king::generate(state, piece, to_row, to_col),
    };

    result.ok_or(MoveRejection::InvalidMove)
}

/// `legalMovesForPlayer(state, player)` (spec.md §4.2): every non-busy,
/// non-captured piece of `player`, paired with the destinations its
/// generator currently accepts.
pub fn legal_moves_for_player(
    state: &GameState,
    player: crate::piece::Player,
) -> Vec<(PieceId, Vec<(Coord, Coord)>)> {
    let size = state.board_type.size();
    let mut out = Vec::new();
    for piece in &state.board.pieces {
        if piece.player != player || piece.captured || state.is_piece_busy(piece.id) {
            continue;
        }
        let mut destinations = Vec::new();
        for row in 0..size {
            for col in 0..size {
                if (row, col) == (piece.row, piece.col) {
                    continue;
                }
                if candidate_path(state, piece.id, row, col).is_ok() {
                    destinations.push((row, col));
                }
            }
        }
        if !destinations.is_empty() {
            out.push((piece.id, destinations));
        }
    }
    out
}

/// Ray/straight-line squares from `from` to `to` inclusive, or `None` if
/// the two squares aren't aligned on a rank, file, or diagonal.
pub(crate) fn ray_path(from: (Coord, Coord), to: (Coord, Coord)) -> Option<Vec<(Coord, Coord)>> {
    let (dr, dc) = (to.0 - from.0, to.1 - from.1);
    if dr == 0 && dc == 0 {
        return None;
    }
    let step_r = dr.signum();
    let step_c = dc.signum();
    let aligned = dr == 0 || dc == 0 || dr.abs() == dc.abs();
    if !aligned {
        return None;
    }
    let steps = dr.abs().max(dc.abs());
    let mut path = Vec::with_capacity(steps as usize + 1);
    for i in 0..=steps {
        path.push((from.0 + step_r * i, from.1 + step_c * i));
    }
    Some(path)
}

/// The blockage rule shared by every piece except the knight (spec.md
/// §4.2): every interior square of `path` must be empty, the destination
/// must not hold a piece belonging to the mover, and no square on `path`
/// (other than the origin) may appear in the future path of another of
/// the mover's own pieces. See DESIGN.md for the conservative reading of
/// the transient-conflict open question (§9).
pub(crate) fn is_blocked(state: &GameState, mover: &crate::piece::Piece, path: &[(Coord, Coord)]) -> bool {
    let dest = *path.last().unwrap();
    for &square in &path[1..path.len() - 1] {
        if state.board.piece_at(square.0, square.1).is_some() {
            return true;
        }
    }
    if let Some(occupant) = state.board.piece_at(dest.0, dest.1) {
        if occupant.player == mover.player {
            return true;
        }
    }
    future_path_conflict(state, mover, path)
}

/// The knight ignores interior-square blockage but still can't land on its
/// own piece and is still subject to the future-path conflict rule.
pub(crate) fn is_blocked_for_jump(state: &GameState, mover: &crate::piece::Piece, dest: (Coord, Coord)) -> bool {
    if let Some(occupant) = state.board.piece_at(dest.0, dest.1) {
        if occupant.player == mover.player {
            return true;
        }
    }
    future_path_conflict(state, mover, &[(mover.row, mover.col), dest])
}

fn future_path_conflict(state: &GameState, mover: &crate::piece::Piece, path: &[(Coord, Coord)]) -> bool {
    for active in &state.active_moves {
        if active.piece_id == mover.id {
            continue;
        }
        let other = state.board.piece(active.piece_id);
        if other.player != mover.player {
            continue;
        }
        for &square in &path[1..] {
            if active.path.contains(&square) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{initial_board, BoardType};
    use crate::piece::Player;
    use crate::state::{Speed, Status};

    fn playing_state(board_type: BoardType) -> GameState {
        let mut state = GameState::new(board_type, Speed::Standard);
        state.status = Status::Playing;
        state
    }

    #[test]
    fn ray_path_rejects_unaligned_destination() {
        assert!(ray_path((0, 0), (1, 2)).is_none());
    }

    #[test]
    fn white_pawn_double_step_from_start() {
        let state = playing_state(BoardType::Standard8x8);
        let pawn_id = state
            .board
            .pieces
            .iter()
            .find(|p| p.player == Player::new(1) && p.row == 6 && p.col == 4)
            .unwrap()
            .id;
        let result = candidate_path(&state, pawn_id, 4, 4).unwrap();
        assert_eq!(result.path, vec![(6, 4), (5, 4), (4, 4)]);
    }

    #[test]
    fn legal_moves_for_player_excludes_busy_pieces() {
        let state = playing_state(BoardType::Standard8x8);
        let moves = legal_moves_for_player(&state, Player::new(1));
        assert!(!moves.is_empty());
    }
}
