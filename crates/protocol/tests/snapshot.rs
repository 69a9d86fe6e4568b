use engine::{BoardType, GameState, Speed};
use protocol::Snapshot;

#[test]
fn a_fresh_game_snapshots_with_no_active_moves_or_cooldowns() {
    let state = GameState::new(BoardType::Standard8x8, Speed::Standard);
    let snapshot = Snapshot::from_state(uuid::Uuid::nil(), &state, 10, vec![], 0.0);
    assert_eq!(snapshot.pieces.len(), 32);
    assert!(snapshot.active_moves.is_empty());
    assert!(snapshot.cooldowns.is_empty());
    assert!(snapshot.pieces.iter().all(|p| !p.moving && !p.on_cooldown));
}

#[test]
fn a_snapshot_round_trips_through_json() {
    let state = GameState::new(BoardType::Standard8x8, Speed::Standard);
    let snapshot = Snapshot::from_state(uuid::Uuid::nil(), &state, 10, vec![], 0.0);
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.tick, snapshot.tick);
    assert_eq!(back.pieces.len(), snapshot.pieces.len());
}
