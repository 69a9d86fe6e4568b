//! Rejection and invariant-violation error types.
//!
//! Mirrors the teacher's `thiserror`-based error enums: one variant per
//! failure mode, a short `#[error("...")]` message, and a `Result` alias.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a `move` intent was rejected (spec.md §4.10, §6). Never mutates
/// state — surfaced to the submitter only.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveRejection {
    #[error("game has not started")]
    GameNotStarted,
    #[error("game is already over")]
    GameOver,
    #[error("no piece at the requested square")]
    PieceNotFound,
    #[error("piece does not belong to the submitting player")]
    NotYourPiece,
    #[error("piece has already been captured")]
    PieceCaptured,
    #[error("piece is moving or on cooldown")]
    PieceBusy,
    #[error("move is not legal for this piece")]
    InvalidMove,
}

pub type MoveResult<T> = Result<T, MoveRejection>;

/// A violated engine invariant (spec.md §8, §4.10). Fatal: the runtime
/// tears the session down when this surfaces from `tick`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("piece {0:?} present in both activeMoves and cooldowns")]
    PieceInMotionAndCooldown(crate::piece::PieceId),
    #[error("piece {0:?} appears more than once in activeMoves")]
    DuplicateActiveMove(crate::piece::PieceId),
    #[error("cooldown for piece {0:?} out of bounds: {1}")]
    CooldownOutOfBounds(crate::piece::PieceId, i64),
}
