//! Intents a player can submit against a running game (spec.md §4.10).
//!
//! Move intents address a piece by its stable `PieceId`, the same
//! identity a player last saw in a snapshot (spec.md §4.8) — this is what
//! keeps `PieceCaptured` a distinct, reachable rejection from
//! `PieceNotFound`: a client can race a stale id against a piece that was
//! captured since its last snapshot.

use crate::error::MoveRejection;
use crate::piece::{Coord, PieceId, Player};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Intent {
    /// A player declaring themselves ready during the waiting phase
    /// (spec.md §4.6). The game starts once every seat has readied up.
    Ready { player: Player },
    /// A move request, addressed by the mover's piece id and a
    /// destination square.
    Move {
        player: Player,
        piece_id: PieceId,
        to: (Coord, Coord),
    },
    /// Voluntary resignation (spec.md §4.5, §9 supplemented feature). The
    /// player is eliminated immediately; their pieces stay on the board.
    Resign { player: Player },
}

/// One intent tagged with a caller-assigned correlation id (spec.md §6: every
/// `move`/`ready` gets an individual response to its submitter). The engine
/// doesn't know or care what the id means — it only echoes it back alongside
/// the matching [`IntentOutcome`] so the runtime layer can route the
/// response to the right submitter without this crate knowing about
/// channels or transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentRequest {
    pub id: u64,
    pub intent: Intent,
}

/// The per-submitter response to one intent (spec.md §6 Responses).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IntentOutcome {
    MoveAccepted {
        piece_id: PieceId,
        path: Vec<(Coord, Coord)>,
        start_tick: u64,
    },
    MoveRejected {
        piece_id: PieceId,
        reason: MoveRejection,
    },
    ReadyAck {
        game_started: bool,
    },
    Resigned,
}
