//! Pure, deterministic Kung Fu Chess rules: board geometry, move
//! generation, collision arbitration, and the per-tick state transition.
//!
//! This crate never logs, sleeps, or touches the clock — every output is a
//! function of its inputs (spec.md §9 "Engine purity"). Scheduling,
//! networking, and observability live one layer up, in `runtime`.

pub mod board;
pub mod collision;
pub mod error;
pub mod event;
pub mod intent;
pub mod moves;
pub mod piece;
pub mod state;
pub mod terminal;
pub mod tick;

pub use board::{Board, BoardType, Orientation};
pub use error::{InvariantViolation, MoveRejection, MoveResult};
pub use event::Event;
pub use intent::{Intent, IntentOutcome, IntentRequest};
pub use piece::{Coord, Piece, PieceId, PieceType, Player};
pub use state::{ActiveMove, Cooldown, ExtraMove, GameState, Speed, SpeedConfig, Status, WinReason, Winner};
pub use tick::tick;
