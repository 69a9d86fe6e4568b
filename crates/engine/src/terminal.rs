//! Terminal-condition evaluation: king capture, last-player-standing on
//! the four-player board, resignation, and draw-by-inactivity
//! (spec.md §4.5).

use crate::piece::{PieceType, Player};
use crate::state::{GameState, SpeedConfig, WinReason, Winner};

/// Every seat the board defines, in order, regardless of elimination.
fn all_players(state: &GameState) -> Vec<Player> {
    (1..=state.board_type.player_count()).map(Player::new).collect()
}

/// Marks any player whose king has no piece left on the board as
/// eliminated. Idempotent — safe to call every tick after captures are
/// applied (spec.md §4.5: "a captured king eliminates that player
/// immediately").
pub fn eliminate_kingless_players(state: &mut GameState) {
    for player in all_players(state) {
        if state.eliminated.contains(&player) {
            continue;
        }
        let has_king = state
            .board
            .pieces
            .iter()
            .any(|p| p.player == player && !p.captured && p.piece_type == PieceType::King);
        if !has_king {
            state.eliminated.insert(player);
        }
    }
}

/// Re-evaluates whether the game has ended, given the current board and
/// idle/no-capture clocks (spec.md §4.5). Returns `None` while play
/// continues.
pub fn evaluate(state: &GameState, speed_config: &SpeedConfig) -> Option<(Winner, WinReason)> {
    let remaining: Vec<Player> = all_players(state)
        .into_iter()
        .filter(|p| !state.eliminated.contains(p))
        .collect();

    if remaining.is_empty() {
        return Some((Winner::Draw, WinReason::KingCaptured));
    }
    if remaining.len() == 1 {
        // Every eliminated seat left by resignation (spec.md §4.5
        // "if only one player remains, they win with winReason =
        // resignation") rather than by having their king captured.
        let all_via_resignation = all_players(state)
            .into_iter()
            .filter(|p| *p != remaining[0])
            .all(|p| state.resigned.contains(&p));
        let reason = if all_via_resignation {
            WinReason::Resignation
        } else {
            WinReason::KingCaptured
        };
        return Some((Winner::Player(remaining[0]), reason));
    }

    let idle = state.tick.saturating_sub(state.last_move_tick);
    let since_capture = state.tick.saturating_sub(state.last_capture_tick);
    if idle >= speed_config.draw_idle_ticks && since_capture >= speed_config.draw_no_capture_ticks {
        return Some((Winner::Draw, WinReason::DrawTimeout));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardType;
    use crate::state::Speed;

    #[test]
    fn two_player_game_ends_when_one_king_is_captured() {
        let mut state = GameState::new(BoardType::Standard8x8, Speed::Standard);
        let black_king = state
            .board
            .pieces
            .iter()
            .find(|p| p.player == Player::new(2) && p.piece_type == PieceType::King)
            .unwrap()
            .id;
        state.board.piece_mut(black_king).captured = true;

        eliminate_kingless_players(&mut state);
        let config = state.speed_config(10);
        let outcome = evaluate(&state, &config);
        assert_eq!(outcome, Some((Winner::Player(Player::new(1)), WinReason::KingCaptured)));
    }

    #[test]
    fn draws_by_inactivity_once_both_idle_and_no_capture_thresholds_are_reached() {
        let mut state = GameState::new(BoardType::Standard8x8, Speed::Standard);
        let config = state.speed_config(10);
        // Both clocks must clear their threshold (spec.md §4.5: idle AND
        // no-capture), so park the tick at the larger of the two.
        state.tick = config.draw_no_capture_ticks;
        state.last_move_tick = 0;
        state.last_capture_tick = 0;
        let outcome = evaluate(&state, &config);
        assert_eq!(outcome, Some((Winner::Draw, WinReason::DrawTimeout)));
    }

    #[test]
    fn no_draw_while_only_the_idle_clock_has_crossed_its_threshold() {
        let mut state = GameState::new(BoardType::Standard8x8, Speed::Standard);
        let config = state.speed_config(10);
        state.tick = config.draw_idle_ticks;
        state.last_move_tick = 0;
        // A recent capture keeps the no-capture clock well under threshold.
        state.last_capture_tick = config.draw_idle_ticks;
        let outcome = evaluate(&state, &config);
        assert_eq!(outcome, None);
    }

    #[test]
    fn four_player_game_continues_after_a_single_elimination() {
        let mut state = GameState::new(BoardType::FourPlayer12x12, Speed::Standard);
        let king = state
            .board
            .pieces
            .iter()
            .find(|p| p.player == Player::new(3) && p.piece_type == PieceType::King)
            .unwrap()
            .id;
        state.board.piece_mut(king).captured = true;

        eliminate_kingless_players(&mut state);
        let config = state.speed_config(10);
        assert_eq!(evaluate(&state, &config), None);
        assert!(state.eliminated.contains(&Player::new(3)));
    }

    #[test]
    fn last_remaining_player_wins_by_resignation_when_nobody_lost_a_king() {
        let mut state = GameState::new(BoardType::Standard8x8, Speed::Standard);
        state.eliminated.insert(Player::new(2));
        state.resigned.insert(Player::new(2));

        let config = state.speed_config(10);
        let outcome = evaluate(&state, &config);
        assert_eq!(outcome, Some((Winner::Player(Player::new(1)), WinReason::Resignation)));
    }

    #[test]
    fn a_captured_king_still_wins_king_captured_even_if_someone_else_resigned() {
        let mut state = GameState::new(BoardType::FourPlayer12x12, Speed::Standard);
        state.eliminated.insert(Player::new(2));
        state.resigned.insert(Player::new(2));
        let king3 = state
            .board
            .pieces
            .iter()
            .find(|p| p.player == Player::new(3) && p.piece_type == PieceType::King)
            .unwrap()
            .id;
        let king4 = state
            .board
            .pieces
            .iter()
            .find(|p| p.player == Player::new(4) && p.piece_type == PieceType::King)
            .unwrap()
            .id;
        state.board.piece_mut(king3).captured = true;
        state.board.piece_mut(king4).captured = true;
        eliminate_kingless_players(&mut state);

        let config = state.speed_config(10);
        let outcome = evaluate(&state, &config);
        assert_eq!(outcome, Some((Winner::Player(Player::new(1)), WinReason::KingCaptured)));
    }
}
