//! Where a sealed [`protocol::Replay`] goes once a game finishes (spec.md
//! §4.9). Persistent storage is explicitly out of scope (spec.md §1
//! Non-goals: "treated as external collaborators") — this module only
//! defines the seam a caller plugs a real store into.

use async_trait::async_trait;
use protocol::Replay;

#[async_trait]
pub trait ReplaySink: Send + Sync {
    async fn seal(&self, replay: Replay);
}

/// Discards every replay. The default for a session that doesn't care.
#[derive(Debug, Default)]
pub struct NullReplaySink;

#[async_trait]
impl ReplaySink for NullReplaySink {
    async fn seal(&self, _replay: Replay) {}
}

/// Keeps every sealed replay in memory, for tests that want to inspect what
/// a session produced.
#[derive(Debug, Default)]
pub struct VecReplaySink {
    sealed: tokio::sync::Mutex<Vec<Replay>>,
}

impl VecReplaySink {
    pub fn new() -> VecReplaySink {
        VecReplaySink::default()
    }

    pub async fn sealed(&self) -> Vec<Replay> {
        self.sealed.lock().await.clone()
    }
}

#[async_trait]
impl ReplaySink for VecReplaySink {
    async fn seal(&self, replay: Replay) {
        self.sealed.lock().await.push(replay);
    }
}
