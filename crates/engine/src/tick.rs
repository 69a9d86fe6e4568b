//! The pure per-tick state transition (spec.md §4.4): `(state, intents) ->
//! (state', events)`. No callbacks, no clock reads, no logging — every
//! side effect is returned as data for the caller (`runtime::Session`) to
//! act on.

use crate::board::orientation_for;
use crate::collision::resolve_collisions;
use crate::error::{InvariantViolation, MoveRejection};
use crate::event::Event;
use crate::intent::{Intent, IntentOutcome, IntentRequest};
use crate::moves::candidate_path;
use crate::piece::PieceType;
use crate::state::{ActiveMove, Cooldown, GameState, Status};
use crate::terminal;

/// Validates and (if accepted) applies one `Move` intent, returning the path
/// it started on. Implements the full session-level chain from spec.md
/// §4.10, in order.
fn accept_move(
    state: &mut GameState,
    events: &mut Vec<Event>,
    player: crate::piece::Player,
    piece_id: crate::piece::PieceId,
    to: (crate::piece::Coord, crate::piece::Coord),
) -> Result<Vec<(crate::piece::Coord, crate::piece::Coord)>, MoveRejection> {
    match state.status {
        Status::Waiting => return Err(MoveRejection::GameNotStarted),
        Status::Finished => return Err(MoveRejection::GameOver),
        Status::Playing => {}
    }
    let piece = state.board.get(piece_id).ok_or(MoveRejection::PieceNotFound)?;
    if piece.player != player {
        return Err(MoveRejection::NotYourPiece);
    }
    if piece.captured {
        return Err(MoveRejection::PieceCaptured);
    }
    if state.eliminated.contains(&player) {
        return Err(MoveRejection::NotYourPiece);
    }
    if state.is_piece_busy(piece_id) {
        return Err(MoveRejection::PieceBusy);
    }

    let result = candidate_path(state, piece_id, to.0, to.1)?;
    let from = (piece.row, piece.col);
    let path = result.path.clone();

    state.active_moves.push(ActiveMove {
        piece_id,
        path: result.path,
        start_tick: state.tick,
        extra_move: result.extra_move,
    });
    state.last_move_tick = state.tick;
    events.push(Event::MoveStarted {
        piece_id,
        from,
        to,
        tick: state.tick,
    });
    Ok(path)
}

/// Step 1 of the tick pipeline: drain and apply every submitted intent,
/// returning one [`IntentOutcome`] per request, tagged with its caller-given
/// id, for the runtime to route back to each submitter (spec.md §6).
/// Rejections never mutate `state'` beyond this — they are not broadcast as
/// events, only returned here (spec.md §4.10).
fn apply_intents(
    state: &mut GameState,
    requests: Vec<IntentRequest>,
    events: &mut Vec<Event>,
) -> Vec<(u64, IntentOutcome)> {
    let mut outcomes = Vec::with_capacity(requests.len());
    for request in requests {
        let outcome = match request.intent {
            Intent::Ready { player } => {
                if state.status == Status::Waiting {
                    state.ready_set.insert(player);
                    let needed = state.board_type.player_count();
                    if state.ready_set.len() as u8 >= needed {
                        state.status = Status::Playing;
                        state.last_move_tick = state.tick;
                        state.last_capture_tick = state.tick;
                    }
                }
                IntentOutcome::ReadyAck {
                    game_started: state.status == Status::Playing,
                }
            }
            Intent::Move { player, piece_id, to } => match accept_move(state, events, player, piece_id, to) {
                Ok(path) => IntentOutcome::MoveAccepted {
                    piece_id,
                    path,
                    start_tick: state.tick,
                },
                Err(reason) => IntentOutcome::MoveRejected { piece_id, reason },
            },
            Intent::Resign { player } => {
                if state.status == Status::Playing {
                    state.eliminated.insert(player);
                    state.resigned.insert(player);
                }
                IntentOutcome::Resigned
            }
        };
        outcomes.push((request.id, outcome));
    }
    outcomes
}

/// Step 2: cooldowns tick down and expire.
fn advance_cooldowns(state: &mut GameState) {
    for c in &mut state.cooldowns {
        c.remaining_ticks = c.remaining_ticks.saturating_sub(1);
    }
    state.cooldowns.retain(|c| c.remaining_ticks > 0);
}

/// Step 4 (after collision resolution): remove captured pieces from play
/// and cancel anything they were doing. `effective_tick` is `state.tick + 1`
/// (spec.md §4.4 step 3: progress is measured as of the tick this
/// transition is advancing *into*, one ahead of the counter this function
/// runs under — `state.tick` itself is only incremented in step 7).
fn apply_captures(state: &mut GameState, events: &mut Vec<Event>, ticks_per_square: f64, effective_tick: u64) {
    let captures = resolve_collisions(state, ticks_per_square, effective_tick);
    for capture in captures {
        state.board.piece_mut(capture.captured).captured = true;
        state.active_moves.retain(|m| m.piece_id != capture.captured);
        state.cooldowns.retain(|c| c.piece_id != capture.captured);
        state.last_capture_tick = state.tick;
        events.push(Event::Capture {
            capturer: capture.capturer,
            captured: capture.captured,
            tick: state.tick,
        });
    }
}

/// Snaps one completed `ActiveMove` onto the board: final position,
/// `hasMoved`, promotion, and entry into cooldown (spec.md §4.4 step 5).
fn finalize_move(state: &mut GameState, mv: &ActiveMove, cooldown_ticks: u32, events: &mut Vec<Event>) {
    let (row, col) = *mv.path.last().unwrap();
    {
        let piece = state.board.piece_mut(mv.piece_id);
        piece.row = row;
        piece.col = col;
        piece.has_moved = true;
    }
    if let Some(extra) = &mv.extra_move {
        let (erow, ecol) = *extra.path.last().unwrap();
        let rook = state.board.piece_mut(extra.piece_id);
        rook.row = erow;
        rook.col = ecol;
        rook.has_moved = true;
    }

    let piece = state.board.piece(mv.piece_id);
    if piece.piece_type == PieceType::Pawn {
        let orientation = orientation_for(&state.board, piece.player);
        let promotes = orientation.promotion_row == Some(piece.row) || orientation.promotion_col == Some(piece.col);
        if promotes {
            state.board.piece_mut(mv.piece_id).piece_type = PieceType::Queen;
            events.push(Event::Promotion {
                piece_id: mv.piece_id,
                tick: state.tick,
            });
        }
    }

    state.cooldowns.push(Cooldown {
        piece_id: mv.piece_id,
        remaining_ticks: cooldown_ticks,
    });
}

/// The full per-tick transition. `tick_rate_hz` is the session's fixed
/// `H` (spec.md §3); it never changes once a game is created.
#[allow(clippy::type_complexity)]
pub fn tick(
    mut state: GameState,
    requests: Vec<IntentRequest>,
    tick_rate_hz: u32,
) -> Result<(GameState, Vec<Event>, Vec<(u64, IntentOutcome)>), InvariantViolation> {
    let mut events = Vec::new();
    let config = state.speed_config(tick_rate_hz);

    let outcomes = apply_intents(&mut state, requests, &mut events);

    if state.status == Status::Playing {
        advance_cooldowns(&mut state);
        let effective_tick = state.tick + 1;
        apply_captures(&mut state, &mut events, config.ticks_per_square, effective_tick);

        let completed: Vec<ActiveMove> = {
            let ticks_per_square = config.ticks_per_square;
            let (done, pending): (Vec<_>, Vec<_>) = state
                .active_moves
                .drain(..)
                .partition(|m| m.progress(effective_tick, ticks_per_square) >= 1.0);
            state.active_moves = pending;
            done
        };
        for mv in &completed {
            finalize_move(&mut state, mv, config.cooldown_ticks, &mut events);
        }

        terminal::eliminate_kingless_players(&mut state);
        if let Some((winner, reason)) = terminal::evaluate(&state, &config) {
            state.status = Status::Finished;
            state.winner = Some(winner);
            state.win_reason = Some(reason);
            events.push(Event::GameOver {
                winner,
                reason,
                tick: state.tick,
            });
        }
    }

    state.tick += 1;
    state.check_invariants(tick_rate_hz)?;
    Ok((state, events, outcomes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardType;
    use crate::piece::Player;
    use crate::state::Speed;

    fn req(id: u64, intent: Intent) -> IntentRequest {
        IntentRequest { id, intent }
    }

    fn ready_game() -> GameState {
        let mut state = GameState::new(BoardType::Standard8x8, Speed::Standard);
        let (state2, _events, _outcomes) = tick(
            state.clone(),
            vec![
                req(1, Intent::Ready { player: Player::new(1) }),
                req(2, Intent::Ready { player: Player::new(2) }),
            ],
            10,
        )
        .unwrap();
        state = state2;
        assert_eq!(state.status, Status::Playing);
        state
    }

    #[test]
    fn a_move_intent_starts_an_active_move_and_emits_an_event() {
        let state = ready_game();
        let pawn_id = state
            .board
            .pieces
            .iter()
            .find(|p| p.player == Player::new(1) && p.row == 6 && p.col == 4)
            .unwrap()
            .id;
        let (state, events, outcomes) = tick(
            state,
            vec![req(
                1,
                Intent::Move {
                    player: Player::new(1),
                    piece_id: pawn_id,
                    to: (4, 4),
                },
            )],
            10,
        )
        .unwrap();
        assert_eq!(state.active_moves.len(), 1);
        assert!(events.iter().any(|e| matches!(e, Event::MoveStarted { .. })));
        assert!(matches!(outcomes[0], (1, IntentOutcome::MoveAccepted { .. })));
    }

    #[test]
    fn a_move_completes_and_enters_cooldown_after_enough_ticks() {
        let mut state = ready_game();
        let pawn_id = state
            .board
            .pieces
            .iter()
            .find(|p| p.player == Player::new(1) && p.row == 6 && p.col == 4)
            .unwrap()
            .id;
        let (next, _, _) = tick(
            state,
            vec![req(
                1,
                Intent::Move {
                    player: Player::new(1),
                    piece_id: pawn_id,
                    to: (5, 4),
                },
            )],
            10,
        )
        .unwrap();
        state = next;
        // ticks_per_square = 10 for standard speed at H=10; one segment.
        for _ in 0..10 {
            let (next, _, _) = tick(state, vec![], 10).unwrap();
            state = next;
        }
        assert!(state.active_moves.is_empty());
        assert_eq!(state.cooldowns.len(), 1);
        let pawn = state.board.piece(pawn_id);
        assert_eq!((pawn.row, pawn.col), (5, 4));
        assert!(pawn.has_moved);
    }

    #[test]
    fn moving_a_piece_you_do_not_own_is_rejected_without_mutating_state() {
        let state = ready_game();
        let pawn_id = state
            .board
            .pieces
            .iter()
            .find(|p| p.player == Player::new(2) && p.row == 1 && p.col == 4)
            .unwrap()
            .id;
        let (state, events, outcomes) = tick(
            state,
            vec![req(
                1,
                Intent::Move {
                    player: Player::new(1),
                    piece_id: pawn_id,
                    to: (3, 4),
                },
            )],
            10,
        )
        .unwrap();
        assert!(state.active_moves.is_empty());
        assert!(events.is_empty());
        assert!(matches!(
            outcomes[0],
            (1, IntentOutcome::MoveRejected { reason: MoveRejection::NotYourPiece, .. })
        ));
    }
}
