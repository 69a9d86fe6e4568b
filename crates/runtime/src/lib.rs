//! The session runtime: owns the tokio per-game task, the intent mailbox,
//! the snapshot fan-out, the AI provider registry, and the top-level game
//! registry (spec.md §4.6, §4.7, §5, §6, §9).
//!
//! `engine` and `protocol` stay pure/data-only; every side effect —
//! ticking, logging, AI provider calls, replay sealing — lives here.

pub mod ai;
pub mod config;
pub mod error;
pub mod registry;
pub mod replay_sink;
pub mod session;

pub use ai::{AiProvider, Dummy, Random};
pub use config::Config;
pub use error::{SessionError, SessionResult};
pub use registry::Registry;
pub use replay_sink::{NullReplaySink, ReplaySink, VecReplaySink};
pub use session::{Session, SessionHandle, SessionSetup};
