//! The top-level game registry: lock-free lookup from opaque game id to a
//! running session's handle (spec.md §6 "Game identifier: opaque string,
//! globally unique within the host"; §9 "lookup is lock-free via a
//! concurrent map").

use uuid::Uuid;

use crate::session::SessionHandle;

/// `scc::HashMap` is already a workspace dependency of the teacher repo;
/// its shard-striped design gives lock-free reads for the common case of
/// many concurrent games being looked up by unrelated callers.
#[derive(Default)]
pub struct Registry {
    games: scc::HashMap<Uuid, SessionHandle>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    pub fn insert(&self, game_id: Uuid, handle: SessionHandle) {
        let _ = self.games.insert(game_id, handle);
    }

    pub fn get(&self, game_id: Uuid) -> Option<SessionHandle> {
        self.games.read(&game_id, |_, handle| handle.clone())
    }

    pub fn remove(&self, game_id: Uuid) {
        self.games.remove(&game_id);
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::Session;
    use engine::{BoardType, Speed};

    #[tokio::test]
    async fn a_registered_game_can_be_looked_up_and_removed() {
        let registry = Registry::new();
        let game_id = Uuid::new_v4();
        let setup = crate::session::SessionSetup::new(BoardType::Standard8x8, Speed::Standard, Config::default());
        let (_task, handle) = Session::spawn(game_id, setup);
        registry.insert(game_id, handle.clone());
        assert!(registry.get(game_id).is_some());
        registry.remove(game_id);
        assert!(registry.get(game_id).is_none());
        handle.shutdown();
    }
}
