//! `GameState` and the supporting records it owns: active moves,
//! cooldowns, and the derived per-speed timing table (spec.md §3).

use std::collections::BTreeSet;

use crate::board::{initial_board, Board, BoardType};
use crate::piece::{Coord, PieceId, Player};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `speed ∈ {standard, lightning}` (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Speed {
    Standard,
    Lightning,
}

/// All per-speed timing constants, derived from one tick-rate constant
/// `H` ticks/second (spec.md §3 SpeedConfig table).
#[derive(Debug, Clone, Copy)]
pub struct SpeedConfig {
    pub ticks_per_square: f64,
    pub cooldown_ticks: u32,
    pub draw_idle_ticks: u64,
    pub draw_no_capture_ticks: u64,
}

impl SpeedConfig {
    pub fn for_speed(speed: Speed, tick_rate_hz: u32) -> SpeedConfig {
        let h = tick_rate_hz as f64;
        match speed {
            Speed::Standard => SpeedConfig {
                ticks_per_square: h * 1.0,
                cooldown_ticks: (h * 10.0) as u32,
                draw_idle_ticks: (h * 120.0) as u64,
                draw_no_capture_ticks: (h * 180.0) as u64,
            },
            Speed::Lightning => SpeedConfig {
                ticks_per_square: h * 0.2,
                cooldown_ticks: (h * 2.0) as u32,
                draw_idle_ticks: (h * 30.0) as u64,
                draw_no_capture_ticks: (h * 45.0) as u64,
            },
        }
    }
}

/// `status ∈ {waiting, playing, finished}` (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    Waiting,
    Playing,
    Finished,
}

/// Why the game ended (spec.md §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WinReason {
    KingCaptured,
    DrawTimeout,
    Resignation,
}

/// `winner` (spec.md §3): `None` while the game is undecided, `Some(Draw)`
/// on a timeout draw, `Some(Player(p))` when `p` wins outright. This is a
/// typed stand-in for the spec's "nullable player id, 0 meaning draw" wire
/// convention — see DESIGN.md for the rationale; the wire layer in
/// `protocol` re-flattens this to the 0-for-draw encoding spec.md §3 and
/// §6 describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Winner {
    Draw,
    Player(Player),
}

/// A piece in transit (spec.md §3). `path` includes the origin; length is
/// always >= 2 (even a knight's jump is `[start, end]`).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActiveMove {
    pub piece_id: PieceId,
    pub path: Vec<(Coord, Coord)>,
    pub start_tick: u64,
    /// Castling's simultaneous rook move (spec.md §4.2), carried alongside
    /// the king's own `ActiveMove` rather than as a second top-level entry
    /// so the two pieces complete atomically in the same tick.
    pub extra_move: Option<ExtraMove>,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtraMove {
    pub piece_id: PieceId,
    pub path: Vec<(Coord, Coord)>,
}

impl ActiveMove {
    /// Number of one-square segments this move covers.
    pub fn segments(&self) -> usize {
        self.path.len() - 1
    }

    /// Progress fraction through the move as of `tick` (spec.md §4.4 step
    /// 3): `f = (tick - startTick) / (segments * ticksPerSquare)`.
    pub fn progress(&self, tick: u64, ticks_per_square: f64) -> f64 {
        let elapsed = (tick - self.start_tick) as f64;
        let total = self.segments() as f64 * ticks_per_square;
        if total <= 0.0 {
            1.0
        } else {
            elapsed / total
        }
    }

    /// The piece's interpolated (row, col) at the given progress fraction,
    /// linear between the segment endpoints it currently straddles.
    pub fn interpolated_position(&self, f: f64) -> (f64, f64) {
        let f = f.clamp(0.0, 1.0);
        let segments = self.segments() as f64;
        let exact = f * segments;
        let idx = (exact.floor() as usize).min(self.path.len() - 2);
        let local_f = exact - idx as f64;
        let (r0, c0) = self.path[idx];
        let (r1, c1) = self.path[idx + 1];
        (
            r0 as f64 + (r1 - r0) as f64 * local_f,
            c0 as f64 + (c1 - c0) as f64 * local_f,
        )
    }
}

/// `Cooldown` (spec.md §3). `remainingTicks` decrements once per tick and
/// is removed at zero.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cooldown {
    pub piece_id: PieceId,
    pub remaining_ticks: u32,
}

/// The full mutable state of one game (spec.md §3). Exclusively owned by
/// one `Session` (spec.md §3 "Ownership"); nothing outside the owning
/// runtime task ever reads or writes it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameState {
    pub board_type: BoardType,
    pub speed: Speed,
    pub status: Status,
    pub tick: u64,
    pub board: Board,
    pub active_moves: Vec<ActiveMove>,
    pub cooldowns: Vec<Cooldown>,
    pub ready_set: BTreeSet<Player>,
    /// Players whose king has been captured, or who resigned. They stay on
    /// the board (see DESIGN.md open-question resolution) but receive no
    /// new intents (spec.md §4.5).
    pub eliminated: BTreeSet<Player>,
    /// The subset of `eliminated` that left by resigning rather than by
    /// king capture — lets `terminal::evaluate` pick `WinReason::Resignation`
    /// over `WinReason::KingCaptured` when that's how the board emptied out
    /// (spec.md §4.5: "if only one player remains, they win with winReason
    /// = resignation").
    pub resigned: BTreeSet<Player>,
    pub winner: Option<Winner>,
    pub win_reason: Option<WinReason>,
    pub last_move_tick: u64,
    pub last_capture_tick: u64,
}

impl GameState {
    pub fn new(board_type: BoardType, speed: Speed) -> GameState {
        GameState {
            board_type,
            speed,
            status: Status::Waiting,
            tick: 0,
            board: initial_board(board_type),
            active_moves: Vec::new(),
            cooldowns: Vec::new(),
            ready_set: BTreeSet::new(),
            eliminated: BTreeSet::new(),
            resigned: BTreeSet::new(),
            winner: None,
            win_reason: None,
            last_move_tick: 0,
            last_capture_tick: 0,
        }
    }

    pub fn speed_config(&self, tick_rate_hz: u32) -> SpeedConfig {
        SpeedConfig::for_speed(self.speed, tick_rate_hz)
    }

    pub fn active_move_for(&self, piece_id: PieceId) -> Option<&ActiveMove> {
        self.active_moves.iter().find(|m| m.piece_id == piece_id)
    }

    pub fn cooldown_for(&self, piece_id: PieceId) -> Option<&Cooldown> {
        self.cooldowns.iter().find(|c| c.piece_id == piece_id)
    }

    pub fn is_piece_busy(&self, piece_id: PieceId) -> bool {
        self.active_move_for(piece_id).is_some() || self.cooldown_for(piece_id).is_some()
    }

    /// spec.md §8 invariants 1 and 3 (Disjointness, Cooldown bound),
    /// checked defensively at the end of every tick (spec.md §4.10:
    /// invariant violations are fatal).
    pub fn check_invariants(&self, tick_rate_hz: u32) -> Result<(), crate::error::InvariantViolation> {
        use std::collections::HashSet;
        let mut seen_active = HashSet::new();
        for m in &self.active_moves {
            if !seen_active.insert(m.piece_id) {
                return Err(crate::error::InvariantViolation::DuplicateActiveMove(
                    m.piece_id,
                ));
            }
            if self.cooldown_for(m.piece_id).is_some() {
                return Err(crate::error::InvariantViolation::PieceInMotionAndCooldown(
                    m.piece_id,
                ));
            }
        }
        let max_cooldown = self.speed_config(tick_rate_hz).cooldown_ticks;
        for c in &self.cooldowns {
            if c.remaining_ticks > max_cooldown {
                return Err(crate::error::InvariantViolation::CooldownOutOfBounds(
                    c.piece_id,
                    c.remaining_ticks as i64,
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_config_matches_table() {
        let standard = SpeedConfig::for_speed(Speed::Standard, 10);
        assert_eq!(standard.ticks_per_square, 10.0);
        assert_eq!(standard.cooldown_ticks, 100);
        assert_eq!(standard.draw_idle_ticks, 1200);
        assert_eq!(standard.draw_no_capture_ticks, 1800);

        let lightning = SpeedConfig::for_speed(Speed::Lightning, 10);
        assert_eq!(lightning.ticks_per_square, 2.0);
        assert_eq!(lightning.cooldown_ticks, 20);
        assert_eq!(lightning.draw_idle_ticks, 300);
        assert_eq!(lightning.draw_no_capture_ticks, 450);
    }

    #[test]
    fn interpolated_position_is_linear_on_a_single_segment() {
        let mv = ActiveMove {
            piece_id: PieceId(0),
            path: vec![(6, 4), (4, 4)],
            start_tick: 0,
            extra_move: None,
        };
        assert_eq!(mv.interpolated_position(0.0), (6.0, 4.0));
        assert_eq!(mv.interpolated_position(1.0), (4.0, 4.0));
        assert_eq!(mv.interpolated_position(0.5), (5.0, 4.0));
    }
}
