//! AI participant providers (spec.md §4.7): `shouldMove`/`chooseMove`,
//! queried once per tick for every AI-controlled seat. The session treats a
//! provider call that returns `None` from `choose_move` exactly like a
//! human who submitted no intent this tick.

use async_trait::async_trait;
use engine::{Coord, GameState, PieceId, Player};

/// `async-trait` matches the teacher's existing workspace dependency,
/// used here instead of an `async fn` in a trait so the provider can be
/// stored as a trait object (`Box<dyn AiProvider>`) per seat.
#[async_trait]
pub trait AiProvider: Send + Sync {
    async fn should_move(&self, state: &GameState, player: Player, tick: u64) -> bool;

    async fn choose_move(&self, state: &GameState, player: Player) -> Option<(PieceId, (Coord, Coord))>;
}

/// Reference implementation: never moves (spec.md §4.7).
#[derive(Debug, Default)]
pub struct Dummy;

#[async_trait]
impl AiProvider for Dummy {
    async fn should_move(&self, _state: &GameState, _player: Player, _tick: u64) -> bool {
        false
    }

    async fn choose_move(&self, _state: &GameState, _player: Player) -> Option<(PieceId, (Coord, Coord))> {
        None
    }
}

/// Reference implementation: acts every `every_n_ticks` ticks, choosing
/// uniformly from `legalMovesForPlayer` (spec.md §4.7).
#[derive(Debug, Clone, Copy)]
pub struct Random {
    pub every_n_ticks: u64,
}

impl Random {
    pub fn new(every_n_ticks: u64) -> Random {
        Random {
            every_n_ticks: every_n_ticks.max(1),
        }
    }
}

impl Default for Random {
    fn default() -> Self {
        Random::new(5)
    }
}

#[async_trait]
impl AiProvider for Random {
    async fn should_move(&self, _state: &GameState, _player: Player, tick: u64) -> bool {
        tick % self.every_n_ticks == 0
    }

    async fn choose_move(&self, state: &GameState, player: Player) -> Option<(PieceId, (Coord, Coord))> {
        let candidates = engine::moves::legal_moves_for_player(state, player);
        if candidates.is_empty() {
            return None;
        }
        let mut rng = rand::rng();
        use rand::Rng;
        let (piece_id, destinations) = &candidates[rng.random_range(0..candidates.len())];
        let to = destinations[rng.random_range(0..destinations.len())];
        Some((*piece_id, to))
    }
}
