//! Outputs of a tick: the notifications a `Session` fans out to
//! subscribers alongside the new snapshot (spec.md §4.4, §4.8).

use crate::piece::{Coord, PieceId, Player};
use crate::state::{WinReason, Winner};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Event {
    MoveStarted {
        piece_id: PieceId,
        from: (Coord, Coord),
        to: (Coord, Coord),
        tick: u64,
    },
    Capture {
        capturer: PieceId,
        captured: PieceId,
        tick: u64,
    },
    Promotion {
        piece_id: PieceId,
        tick: u64,
    },
    GameOver {
        winner: Winner,
        reason: WinReason,
        tick: u64,
    },
}
