//! End-to-end session lifecycle tests: a session spawned, driven through
//! `SessionHandle`, and observed from the outside exactly as a real caller
//! would (no reaching into `engine::tick` directly).

use std::sync::Arc;
use std::time::Duration;

use engine::{BoardType, Intent, IntentOutcome, MoveRejection, Player, Speed, WinReason};
use runtime::{Config, SessionError, SessionSetup, VecReplaySink};
use uuid::Uuid;

async fn wait_for_one_seal(sink: &VecReplaySink) -> protocol::Replay {
    for _ in 0..200 {
        let sealed = sink.sealed().await;
        if let Some(replay) = sealed.into_iter().next() {
            return replay;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("no replay was sealed within the deadline");
}

#[tokio::test]
async fn resigning_down_to_one_seat_seals_a_replay_with_the_resignation_reason() {
    let config = Config {
        tick_rate_hz: 50,
        idle_reap_secs: 30,
        mailbox_capacity: 16,
        subscriber_buffer_capacity: 16,
    };
    let sink = Arc::new(VecReplaySink::new());
    let setup = SessionSetup::new(BoardType::Standard8x8, Speed::Standard, config)
        .with_replay_sink(sink.clone());
    let (_task, handle) = runtime::Session::spawn(Uuid::new_v4(), setup);

    handle.submit(Intent::Ready { player: Player::new(1) }).await.unwrap();
    handle.submit(Intent::Ready { player: Player::new(2) }).await.unwrap();

    let outcome = handle.submit(Intent::Resign { player: Player::new(2) }).await.unwrap();
    assert_eq!(outcome, IntentOutcome::Resigned);

    let replay = wait_for_one_seal(&sink).await;
    assert_eq!(replay.win_reason, WinReason::Resignation);
    assert_eq!(replay.winner, engine::Winner::Player(Player::new(1)).into());
}

#[tokio::test]
async fn a_session_left_waiting_past_its_idle_deadline_is_reaped_without_sealing_a_replay() {
    let config = Config {
        tick_rate_hz: 50,
        idle_reap_secs: 0,
        mailbox_capacity: 16,
        subscriber_buffer_capacity: 16,
    };
    let sink = Arc::new(VecReplaySink::new());
    let setup = SessionSetup::new(BoardType::Standard8x8, Speed::Standard, config)
        .with_replay_sink(sink.clone());
    let (_task, handle) = runtime::Session::spawn(Uuid::new_v4(), setup);

    // Never ready anyone up; the very first tick already clears a
    // zero-second idle deadline, so the session reaps itself promptly.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let result = handle.submit(Intent::Ready { player: Player::new(1) }).await;
    assert!(matches!(result, Err(SessionError::MailboxClosed)));
    assert!(sink.sealed().await.is_empty());
}

#[tokio::test]
async fn administrative_shutdown_before_the_game_starts_seals_nothing() {
    let config = Config {
        tick_rate_hz: 50,
        idle_reap_secs: 30,
        mailbox_capacity: 16,
        subscriber_buffer_capacity: 16,
    };
    let sink = Arc::new(VecReplaySink::new());
    let setup = SessionSetup::new(BoardType::Standard8x8, Speed::Standard, config)
        .with_replay_sink(sink.clone());
    let (_task, handle) = runtime::Session::spawn(Uuid::new_v4(), setup);

    handle.submit(Intent::Ready { player: Player::new(1) }).await.unwrap();
    handle.shutdown();

    tokio::time::sleep(Duration::from_millis(100)).await;
    let result = handle.submit(Intent::Ready { player: Player::new(2) }).await;
    assert!(matches!(result, Err(SessionError::MailboxClosed)));
    assert!(sink.sealed().await.is_empty());
}

#[tokio::test]
async fn moving_a_piece_that_does_not_exist_is_rejected_but_does_not_kill_the_session() {
    let config = Config {
        tick_rate_hz: 50,
        idle_reap_secs: 30,
        mailbox_capacity: 16,
        subscriber_buffer_capacity: 16,
    };
    let setup = SessionSetup::new(BoardType::Standard8x8, Speed::Standard, config);
    let (_task, handle) = runtime::Session::spawn(Uuid::new_v4(), setup);

    handle.submit(Intent::Ready { player: Player::new(1) }).await.unwrap();
    handle.submit(Intent::Ready { player: Player::new(2) }).await.unwrap();

    let outcome = handle
        .submit(Intent::Move {
            player: Player::new(1),
            piece_id: engine::PieceId(9999),
            to: (4, 4),
        })
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        IntentOutcome::MoveRejected { reason: MoveRejection::PieceNotFound, .. }
    ));

    // The session is still alive and answers a follow-up intent normally.
    let (snapshot, _rx) = handle.subscribe();
    assert_eq!(snapshot.status, engine::Status::Playing);
}
