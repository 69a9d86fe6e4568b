//! Demo binary: spins up one game session with two AI seats, prints every
//! broadcast snapshot until the game ends, then reports the sealed replay.
//! Mirrors the teacher's own `main.rs` layering: `clap` for the config
//! surface, `tracing_subscriber::fmt::init()` first thing, `anyhow` at the
//! edge, typed errors everywhere beneath it.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use engine::{BoardType, Player, Speed};
use runtime::{Config, Random, Registry, Session, SessionSetup, VecReplaySink};
use tracing::info;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::parse();
    let registry = Registry::new();
    let replay_sink = Arc::new(VecReplaySink::new());

    let game_id = Uuid::new_v4();
    let setup = SessionSetup::new(BoardType::Standard8x8, Speed::Standard, config)
        .with_ai(Player::new(1), Arc::new(Random::new(3)))
        .with_ai(Player::new(2), Arc::new(Random::new(4)))
        .with_replay_sink(replay_sink.clone());

    let (task, handle) = Session::spawn(game_id, setup);
    registry.insert(game_id, handle.clone());
    info!(%game_id, "demo game created, both seats are AI-controlled");

    let (_initial, mut snapshots) = handle.subscribe();
    let watcher = tokio::spawn(async move {
        loop {
            match snapshots.recv().await {
                Ok(snapshot) => {
                    if !snapshot.events.is_empty() {
                        info!(tick = snapshot.tick, events = ?snapshot.events, "tick");
                    }
                    if snapshot.status == engine::Status::Finished {
                        info!(tick = snapshot.tick, "game over");
                        break;
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                    info!(skipped = n, "subscriber lagged, dropped snapshots");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Both seats are AI, pre-readied at setup (spec.md §4.6) — the game
    // starts on its own as soon as the session's first tick fires.
    tokio::time::timeout(Duration::from_secs(300), task).await??;
    let _ = watcher.await;
    registry.remove(game_id);

    for replay in replay_sink.sealed().await {
        info!(
            total_ticks = replay.total_ticks,
            winner = ?replay.winner,
            reason = ?replay.win_reason,
            moves = replay.moves.len(),
            "replay sealed"
        );
    }

    Ok(())
}
