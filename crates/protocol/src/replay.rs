//! The sealed record of one finished game (spec.md §3, §4.9): enough to
//! replay every move in order and reproduce the exact same outcome by
//! feeding it back through `engine::tick`.

use engine::{BoardType, Coord, PieceId, Player, Speed, WinReason};
use serde::{Deserialize, Serialize};

use crate::WireWinner;

/// Bumped whenever a field is added or reinterpreted; lets a reader of an
/// archived replay detect a format it doesn't understand instead of
/// silently misreading it.
pub const REPLAY_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayMove {
    pub tick: u64,
    pub player: Player,
    pub piece_id: PieceId,
    pub to: (Coord, Coord),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replay {
    pub version: u32,
    pub speed: Speed,
    pub board_type: BoardType,
    pub players: Vec<Player>,
    pub moves: Vec<ReplayMove>,
    pub total_ticks: u64,
    pub winner: WireWinner,
    pub win_reason: WinReason,
}

impl Replay {
    pub fn new(
        speed: Speed,
        board_type: BoardType,
        players: Vec<Player>,
        moves: Vec<ReplayMove>,
        total_ticks: u64,
        winner: engine::Winner,
        win_reason: WinReason,
    ) -> Replay {
        Replay {
            version: REPLAY_VERSION,
            speed,
            board_type,
            players,
            moves,
            total_ticks,
            winner: winner.into(),
            win_reason,
        }
    }
}
