//! Runtime-layer failures: mailbox/administrative/game-lookup problems that
//! sit above the pure engine's own [`engine::MoveRejection`] and
//! [`engine::InvariantViolation`] (spec.md §4.10).

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("game {0} not found")]
    GameNotFound(Uuid),

    #[error("session's intent mailbox is closed")]
    MailboxClosed,

    #[error("session has already been started")]
    AlreadyStarted,

    #[error("the game was torn down before a response for this intent arrived")]
    NoResponse,

    #[error("engine invariant violated, session terminated: {0}")]
    Fatal(#[from] engine::InvariantViolation),
}

pub type SessionResult<T> = Result<T, SessionError>;
