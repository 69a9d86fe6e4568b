//! The per-tick broadcast snapshot (spec.md §4.8): a full, self-contained
//! view of the game, sent to every subscriber on every tick and
//! immediately on (re)subscription.

use engine::{Coord, GameState, PieceId, PieceType, Player, Status};
use serde::{Deserialize, Serialize};

use crate::WireWinner;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieceView {
    pub id: PieceId,
    pub piece_type: PieceType,
    pub player: Player,
    pub row: Coord,
    pub col: Coord,
    pub captured: bool,
    pub has_moved: bool,
    /// Whether this piece currently has an `ActiveMove` (spec.md §4.8
    /// "moving").
    pub moving: bool,
    /// Whether this piece currently has a `Cooldown` entry (spec.md §4.8
    /// "onCooldown").
    pub on_cooldown: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveView {
    pub piece_id: PieceId,
    pub path: Vec<(Coord, Coord)>,
    pub progress: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CooldownView {
    pub piece_id: PieceId,
    pub remaining_ticks: u32,
}

/// One engine `Event`, flattened for the wire: `winner` in `GameOver`
/// becomes the nullable-id-with-0-for-draw convention spec.md §3/§6
/// describe instead of the engine's typed `Winner`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WireEvent {
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
        winner: WireWinner,
        reason: engine::WinReason,
        tick: u64,
    },
}

impl From<engine::Event> for WireEvent {
    fn from(event: engine::Event) -> Self {
        match event {
            engine::Event::MoveStarted { piece_id, from, to, tick } => {
                WireEvent::MoveStarted { piece_id, from, to, tick }
            }
            engine::Event::Capture { capturer, captured, tick } => {
                WireEvent::Capture { capturer, captured, tick }
            }
            engine::Event::Promotion { piece_id, tick } => WireEvent::Promotion { piece_id, tick },
            engine::Event::GameOver { winner, reason, tick } => WireEvent::GameOver {
                winner: winner.into(),
                reason,
                tick,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub game_id: uuid::Uuid,
    pub tick: u64,
    pub tick_rate_hz: u32,
    pub status: Status,
    pub pieces: Vec<PieceView>,
    pub active_moves: Vec<MoveView>,
    pub cooldowns: Vec<CooldownView>,
    pub events: Vec<WireEvent>,
    /// Server-side wall-clock seconds elapsed since `tick` was computed,
    /// so a client can dead-reckon interpolated positions between
    /// snapshots (spec.md §4.8 "timeSinceTick").
    pub time_since_tick: f64,
}

impl Snapshot {
    pub fn from_state(
        game_id: uuid::Uuid,
        state: &GameState,
        tick_rate_hz: u32,
        events: Vec<engine::Event>,
        time_since_tick: f64,
    ) -> Snapshot {
        let config = state.speed_config(tick_rate_hz);
        let pieces = state
            .board
            .pieces
            .iter()
            .map(|p| PieceView {
                id: p.id,
                piece_type: p.piece_type,
                player: p.player,
                row: p.row,
                col: p.col,
                captured: p.captured,
                has_moved: p.has_moved,
                moving: state.active_move_for(p.id).is_some(),
                on_cooldown: state.cooldown_for(p.id).is_some(),
            })
            .collect();
        let active_moves = state
            .active_moves
            .iter()
            .map(|m| MoveView {
                piece_id: m.piece_id,
                path: m.path.clone(),
                progress: m.progress(state.tick, config.ticks_per_square),
            })
            .collect();
        let cooldowns = state
            .cooldowns
            .iter()
            .map(|c| CooldownView {
                piece_id: c.piece_id,
                remaining_ticks: c.remaining_ticks,
            })
            .collect();

        Snapshot {
            game_id,
            tick: state.tick,
            tick_rate_hz,
            status: state.status,
            pieces,
            active_moves,
            cooldowns,
            events: events.into_iter().map(WireEvent::from).collect(),
            time_since_tick,
        }
    }
}
