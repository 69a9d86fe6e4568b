//! Collision resolution: the Euclidean-proximity capture check run once
//! per tick against every live piece's current (possibly interpolated)
//! position (spec.md §4.3).

use crate::board::Board;
use crate::piece::{PieceId, PieceType};
use crate::state::{ActiveMove, GameState};

/// Distance (in squares) below which two pieces collide and one captures
/// the other (spec.md §4.3).
const CAPTURE_DISTANCE: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureEvent {
    pub capturer: PieceId,
    pub captured: PieceId,
}

struct Entity {
    piece_id: PieceId,
    pos: (f64, f64),
    /// `None` for a stationary piece. A stationary piece never initiates a
    /// capture — it can only be captured by a piece moving into it.
    mover: Option<MoverInfo>,
}

struct MoverInfo {
    start_tick: u64,
    capture_eligible: bool,
}

/// Whether `mv`'s single current segment is a diagonal step (used to tell
/// a pawn's capturing diagonal move from its non-capturing straight one).
fn is_diagonal_segment(mv: &ActiveMove, f: f64) -> bool {
    let segments = mv.segments().max(1) as f64;
    let idx = ((f.clamp(0.0, 1.0) * segments).floor() as usize).min(mv.path.len() - 2);
    let (r0, c0) = mv.path[idx];
    let (r1, c1) = mv.path[idx + 1];
    r0 != r1 && c0 != c1
}

fn build_entities(state: &GameState, ticks_per_square: f64, tick: u64) -> Vec<Entity> {
    let mut moving_ids = std::collections::HashSet::new();
    let mut entities = Vec::new();

    for mv in &state.active_moves {
        let piece = state.board.piece(mv.piece_id);
        if piece.captured {
            continue;
        }
        let f = mv.progress(tick, ticks_per_square);
        if let Some((lo, hi)) = piece.piece_type.airborne_window() {
            if f >= lo && f < hi {
                // Airborne knights render as invisible: excluded entirely
                // from collision resolution, both as attacker and victim.
                moving_ids.insert(mv.piece_id);
                continue;
            }
        }
        let diagonal = is_diagonal_segment(mv, f);
        let capture_eligible = piece.piece_type.can_capture_by_collision(diagonal);
        entities.push(Entity {
            piece_id: mv.piece_id,
            pos: mv.interpolated_position(f),
            mover: Some(MoverInfo {
                start_tick: mv.start_tick,
                capture_eligible,
            }),
        });
        moving_ids.insert(mv.piece_id);
    }

    for piece in &state.board.pieces {
        if piece.captured || moving_ids.contains(&piece.id) {
            continue;
        }
        entities.push(Entity {
            piece_id: piece.id,
            pos: (piece.row as f64, piece.col as f64),
            mover: None,
        });
    }

    entities.sort_by_key(|e| e.piece_id.0);
    entities
}

fn piece_id_order(board: &Board) -> impl Fn(PieceId, PieceId) -> std::cmp::Ordering + '_ {
    move |a, b| board.piece(a).id.0.cmp(&board.piece(b).id.0)
}

/// Run the collision pass for the current tick and return every capture it
/// produces, in deterministic order. Does not mutate `state` — the caller
/// (spec.md §4.4 step 4) applies the resulting captures.
pub fn resolve_collisions(state: &GameState, ticks_per_square: f64, tick: u64) -> Vec<CaptureEvent> {
    let entities = build_entities(state, ticks_per_square, tick);
    let order = piece_id_order(&state.board);
    let mut captured: std::collections::HashSet<PieceId> = std::collections::HashSet::new();
    let mut events = Vec::new();

    for i in 0..entities.len() {
        for j in (i + 1)..entities.len() {
            let a = &entities[i];
            let b = &entities[j];
            if a.mover.is_none() && b.mover.is_none() {
                continue; // two stationary pieces never collide
            }
            if captured.contains(&a.piece_id) || captured.contains(&b.piece_id) {
                continue;
            }
            let dr = a.pos.0 - b.pos.0;
            let dc = a.pos.1 - b.pos.1;
            if (dr * dr + dc * dc).sqrt() >= CAPTURE_DISTANCE {
                continue;
            }

            let a_eligible = a.mover.as_ref().is_some_and(|m| m.capture_eligible);
            let b_eligible = b.mover.as_ref().is_some_and(|m| m.capture_eligible);

            let winner = match (a_eligible, b_eligible) {
                (true, true) => {
                    let a_tick = a.mover.as_ref().unwrap().start_tick;
                    let b_tick = b.mover.as_ref().unwrap().start_tick;
                    match a_tick.cmp(&b_tick).then_with(|| order(a.piece_id, b.piece_id)) {
                        std::cmp::Ordering::Less | std::cmp::Ordering::Equal => Some((a.piece_id, b.piece_id)),
                        std::cmp::Ordering::Greater => Some((b.piece_id, a.piece_id)),
                    }
                }
                (true, false) => Some((a.piece_id, b.piece_id)),
                (false, true) => Some((b.piece_id, a.piece_id)),
                (false, false) => None,
            };

            if let Some((capturer, victim)) = winner {
                captured.insert(victim);
                events.push(CaptureEvent {
                    capturer,
                    captured: victim,
                });
            }
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardType;
    use crate::piece::Player;
    use crate::state::{GameState, Speed};

    fn base_state() -> GameState {
        GameState::new(BoardType::Standard8x8, Speed::Standard)
    }

    #[test]
    fn straight_pawn_cannot_capture_but_can_be_captured() {
        let mut state = base_state();
        // Clear the board down to just a pawn and a rook that will collide.
        for p in state.board.pieces.iter_mut() {
            p.captured = true;
        }
        let white_pawn_id = state.board.pieces[8].id;
        {
            let p = state.board.piece_mut(white_pawn_id);
            p.captured = false;
            p.piece_type = PieceType::Pawn;
            p.player = Player::new(1);
            p.row = 6;
            p.col = 4;
        }
        let black_rook_id = state.board.pieces[0].id;
        {
            let r = state.board.piece_mut(black_rook_id);
            r.captured = false;
            r.piece_type = PieceType::Rook;
            r.player = Player::new(2);
            r.row = 5;
            r.col = 9;
        }

        // Both moves start at tick 0, run one segment over 10 ticks, and
        // land on the same square (5,4) at exactly tick 10.
        state.active_moves.push(ActiveMove {
            piece_id: white_pawn_id,
            path: vec![(6, 4), (5, 4)],
            start_tick: 0,
            extra_move: None,
        });
        state.active_moves.push(ActiveMove {
            piece_id: black_rook_id,
            path: vec![(5, 9), (5, 4)],
            start_tick: 0,
            extra_move: None,
        });

        let events = resolve_collisions(&state, 10.0, 10);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].capturer, black_rook_id);
        assert_eq!(events[0].captured, white_pawn_id);
    }

    #[test]
    fn airborne_knight_is_untouchable() {
        let mut state = base_state();
        for p in state.board.pieces.iter_mut() {
            p.captured = true;
        }
        let knight_id = state.board.pieces[1].id;
        {
            let k = state.board.piece_mut(knight_id);
            k.captured = false;
            k.piece_type = PieceType::Knight;
            k.player = Player::new(1);
            k.row = 7;
            k.col = 1;
        }
        let queen_id = state.board.pieces[3].id;
        {
            let q = state.board.piece_mut(queen_id);
            q.captured = false;
            q.piece_type = PieceType::Queen;
            q.player = Player::new(2);
            q.row = 5;
            q.col = 2;
        }
        state.active_moves.push(ActiveMove {
            piece_id: knight_id,
            path: vec![(7, 1), (5, 2)],
            start_tick: 0,
            extra_move: None,
        });

        // ticks_per_square = 10, single knight segment -> total duration 10
        // ticks. Progress 0.5 sits inside the 15%-85% airborne window.
        let events = resolve_collisions(&state, 10.0, 5);
        assert!(events.is_empty());
    }
}
