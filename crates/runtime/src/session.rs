//! The per-game session task (spec.md §4.6): owns one `GameState`, an
//! inbound intent mailbox, a subscriber set, a replay recorder, and the
//! tick timer. Everything here is the only place in the workspace that
//! touches the clock, logs, or does I/O — `engine::tick` itself stays pure.
//!
//! The teacher's own multiplayer loop is built on Bevy ECS plus the
//! `lightyear` netcode crate rather than a tokio task-per-game actor; this
//! module's shape is instead grounded directly on the teacher's `tokio`
//! (full-feature) workspace dependency plus idiomatic tokio mailbox/fan-out
//! patterns — see DESIGN.md for the full note on this substitution.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use engine::{
    BoardType, Coord, GameState, Intent, IntentOutcome, IntentRequest, PieceId, Player, Speed, Status,
};
use protocol::replay::ReplayMove;
use protocol::{Replay, Snapshot};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::ai::AiProvider;
use crate::config::Config;
use crate::error::{SessionError, SessionResult};
use crate::replay_sink::{NullReplaySink, ReplaySink};

/// One submitted intent plus where to send its outcome, if anyone is
/// waiting on it (AI-generated intents have no submitter to answer).
struct IntentEnvelope {
    intent: Intent,
    respond_to: Option<oneshot::Sender<IntentOutcome>>,
}

/// Everything needed to start a session: the roster (participant slots,
/// each human-or-AI per spec.md §4.6 Setup), the speed/board, and the
/// operational config.
pub struct SessionSetup {
    pub board_type: BoardType,
    pub speed: Speed,
    pub config: Config,
    pub ai_providers: BTreeMap<Player, Arc<dyn AiProvider>>,
    pub replay_sink: Arc<dyn ReplaySink>,
}

impl SessionSetup {
    pub fn new(board_type: BoardType, speed: Speed, config: Config) -> SessionSetup {
        SessionSetup {
            board_type,
            speed,
            config,
            ai_providers: BTreeMap::new(),
            replay_sink: Arc::new(NullReplaySink),
        }
    }

    /// Registers an AI-controlled seat. AI slots are pre-readied at setup
    /// (spec.md §4.6) — only human seats need to submit a `ready` intent.
    pub fn with_ai(mut self, player: Player, provider: Arc<dyn AiProvider>) -> SessionSetup {
        self.ai_providers.insert(player, provider);
        self
    }

    pub fn with_replay_sink(mut self, sink: Arc<dyn ReplaySink>) -> SessionSetup {
        self.replay_sink = sink;
        self
    }
}

/// A cheap-to-clone handle to a running session. Every clone can submit
/// intents and subscribe to snapshots independently.
#[derive(Clone)]
pub struct SessionHandle {
    game_id: Uuid,
    intent_tx: mpsc::Sender<IntentEnvelope>,
    snapshot_tx: broadcast::Sender<Snapshot>,
    latest_rx: watch::Receiver<Snapshot>,
    shutdown_tx: watch::Sender<bool>,
}

impl SessionHandle {
    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    /// Submits one intent and waits for its response (spec.md §6
    /// Responses): `move_accepted`/`move_rejected` for a `move`, `ready_ack`
    /// for `ready`.
    pub async fn submit(&self, intent: Intent) -> SessionResult<IntentOutcome> {
        let (tx, rx) = oneshot::channel();
        self.intent_tx
            .send(IntentEnvelope {
                intent,
                respond_to: Some(tx),
            })
            .await
            .map_err(|_| SessionError::MailboxClosed)?;
        rx.await.map_err(|_| SessionError::NoResponse)
    }

    /// Subscribes to this session's snapshot stream. Returns the most
    /// recently published snapshot alongside the receiver, so a fresh
    /// subscriber's first view is always a complete snapshot rather than a
    /// wait for the next tick boundary (spec.md §4.8 "(re)subscription").
    pub fn subscribe(&self) -> (Snapshot, broadcast::Receiver<Snapshot>) {
        (self.latest_rx.borrow().clone(), self.snapshot_tx.subscribe())
    }

    /// Requests administrative shutdown (spec.md §5 Cancellation).
    /// Idempotent — calling it more than once has no further effect.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

pub struct Session;

impl Session {
    /// Spawns the session task and returns its join handle alongside a
    /// `SessionHandle` callers use to interact with it.
    pub fn spawn(game_id: Uuid, setup: SessionSetup) -> (JoinHandle<()>, SessionHandle) {
        let state = GameState::new(setup.board_type, setup.speed);
        let config = setup.config;

        let initial_snapshot = Snapshot::from_state(game_id, &state, config.tick_rate_hz, Vec::new(), 0.0);
        let (intent_tx, intent_rx) = mpsc::channel(config.mailbox_capacity);
        let (snapshot_tx, _) = broadcast::channel(config.subscriber_buffer_capacity);
        let (latest_tx, latest_rx) = watch::channel(initial_snapshot);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = SessionHandle {
            game_id,
            intent_tx,
            snapshot_tx: snapshot_tx.clone(),
            latest_rx,
            shutdown_tx,
        };

        let task = tokio::spawn(run(
            game_id,
            state,
            config,
            setup.ai_providers,
            setup.replay_sink,
            intent_rx,
            snapshot_tx,
            latest_tx,
            shutdown_rx,
        ));

        (task, handle)
    }
}

fn all_players(board_type: BoardType) -> Vec<Player> {
    (1..=board_type.player_count()).map(Player::new).collect()
}

#[allow(clippy::too_many_arguments)]
async fn run(
    game_id: Uuid,
    mut state: GameState,
    config: Config,
    ai_providers: BTreeMap<Player, Arc<dyn AiProvider>>,
    replay_sink: Arc<dyn ReplaySink>,
    mut intent_rx: mpsc::Receiver<IntentEnvelope>,
    snapshot_tx: broadcast::Sender<Snapshot>,
    latest_tx: watch::Sender<Snapshot>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    // AI slots are pre-readied at setup (spec.md §4.6) — only human seats
    // need to submit `ready`. The readiness itself still flows through the
    // normal `Intent::Ready` path on the first tick, so the same status
    // transition logic in `engine::tick` handles both.
    let mut ai_readied = false;

    let mut recorded_moves: Vec<ReplayMove> = Vec::new();
    let mut next_id: u64 = 0;
    let idle_deadline = config.idle_reap_deadline();
    let mut last_activity = tokio::time::Instant::now();

    let mut tick_interval = tokio::time::interval(config.tick_period());
    tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    info!(%game_id, board_type = ?state.board_type, speed = ?state.speed, "session started");

    loop {
        tokio::select! {
            biased;

            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    info!(%game_id, "session shut down by administrative signal, no replay sealed");
                    return;
                }
            }

            tick_boundary = tick_interval.tick() => {
                if state.status == Status::Waiting && last_activity.elapsed() >= idle_deadline {
                    info!(%game_id, "session idle-reaped before start, no replay sealed");
                    return;
                }

                let mut pending: Vec<(u64, Option<oneshot::Sender<IntentOutcome>>)> = Vec::new();
                let mut submitted_moves: HashMap<u64, (Player, (Coord, Coord))> = HashMap::new();
                let mut requests = Vec::new();

                while let Ok(envelope) = intent_rx.try_recv() {
                    last_activity = tokio::time::Instant::now();
                    let id = next_id;
                    next_id += 1;
                    if let Intent::Move { player, to, .. } = envelope.intent {
                        submitted_moves.insert(id, (player, to));
                    }
                    pending.push((id, envelope.respond_to));
                    requests.push(IntentRequest { id, intent: envelope.intent });
                }

                if !ai_readied {
                    for player in ai_providers.keys() {
                        let id = next_id;
                        next_id += 1;
                        requests.push(IntentRequest {
                            id,
                            intent: Intent::Ready { player: *player },
                        });
                    }
                    ai_readied = true;
                }

                // AI-produced intents join the same batch, after every human
                // intent received so far this tick (spec.md §4.6).
                if state.status == Status::Playing {
                    for (player, provider) in ai_providers.iter() {
                        if state.eliminated.contains(player) {
                            continue;
                        }
                        if provider.should_move(&state, *player, state.tick).await {
                            if let Some((piece_id, to)) = provider.choose_move(&state, *player).await {
                                let id = next_id;
                                next_id += 1;
                                requests.push(IntentRequest {
                                    id,
                                    intent: Intent::Move { player: *player, piece_id, to },
                                });
                            }
                        }
                    }
                }

                let was_waiting = state.status == Status::Waiting;
                match engine::tick(state.clone(), requests, config.tick_rate_hz) {
                    Ok((new_state, events, outcomes)) => {
                        for (id, outcome) in outcomes {
                            if let IntentOutcome::MoveAccepted { piece_id, start_tick, .. } = &outcome {
                                if let Some((player, to)) = submitted_moves.get(&id) {
                                    recorded_moves.push(ReplayMove {
                                        tick: *start_tick,
                                        player: *player,
                                        piece_id: *piece_id,
                                        to: *to,
                                    });
                                }
                            }
                            if let Some(respond_to) = pending
                                .iter_mut()
                                .find(|(pending_id, _)| *pending_id == id)
                                .and_then(|(_, slot)| slot.take())
                            {
                                let _ = respond_to.send(outcome);
                            }
                        }

                        state = new_state;
                        let time_since_tick = tick_boundary.elapsed().as_secs_f64();
                        let snapshot = Snapshot::from_state(game_id, &state, config.tick_rate_hz, events, time_since_tick);
                        let _ = snapshot_tx.send(snapshot.clone());
                        let _ = latest_tx.send(snapshot.clone());

                        if was_waiting && state.status == Status::Playing {
                            info!(%game_id, "all seats ready, counting down");
                            last_activity = tokio::time::Instant::now();
                            // Detached so the 3-2-1 cosmetic countdown never
                            // stalls tick advancement or mailbox draining —
                            // gameplay is already live the moment every seat
                            // is ready, the countdown is a presentation cue.
                            // Each resend recomputes time_since_tick against
                            // the same tick boundary instead of replaying the
                            // stale reading from the moment the tick fired
                            // (spec.md §4.8: the field must stay truthful
                            // even a second or two after the boundary).
                            let countdown_tx = snapshot_tx.clone();
                            let countdown_snapshot = snapshot.clone();
                            let countdown_game_id = game_id;
                            tokio::spawn(async move {
                                for remaining in (1..=3).rev() {
                                    tokio::time::sleep(Duration::from_secs(1)).await;
                                    debug!(%countdown_game_id, remaining, "countdown");
                                    let mut resend = countdown_snapshot.clone();
                                    resend.time_since_tick = tick_boundary.elapsed().as_secs_f64();
                                    let _ = countdown_tx.send(resend);
                                }
                            });
                        }

                        if state.status == Status::Finished {
                            info!(%game_id, tick = state.tick, "game finished, sealing replay");
                            let replay = Replay::new(
                                state.speed,
                                state.board_type,
                                all_players(state.board_type),
                                std::mem::take(&mut recorded_moves),
                                state.tick,
                                state.winner.expect("finished game has a winner"),
                                state.win_reason.expect("finished game has a win reason"),
                            );
                            replay_sink.seal(replay).await;
                            return;
                        }
                    }
                    Err(violation) => {
                        error!(%game_id, error = %violation, "fatal invariant violation, session terminated");
                        return;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::PieceId;

    #[tokio::test]
    async fn both_players_readying_up_starts_the_game() {
        let config = Config {
            tick_rate_hz: 50,
            idle_reap_secs: 1,
            mailbox_capacity: 16,
            subscriber_buffer_capacity: 16,
        };
        let setup = SessionSetup::new(BoardType::Standard8x8, Speed::Standard, config);
        let (_task, handle) = Session::spawn(Uuid::new_v4(), setup);

        let ack1 = handle.submit(Intent::Ready { player: Player::new(1) }).await.unwrap();
        assert_eq!(ack1, IntentOutcome::ReadyAck { game_started: false });
        let ack2 = handle.submit(Intent::Ready { player: Player::new(2) }).await.unwrap();
        assert_eq!(ack2, IntentOutcome::ReadyAck { game_started: true });

        handle.shutdown();
    }

    #[tokio::test]
    async fn a_move_for_a_piece_you_do_not_own_is_rejected() {
        let config = Config {
            tick_rate_hz: 50,
            idle_reap_secs: 1,
            mailbox_capacity: 16,
            subscriber_buffer_capacity: 16,
        };
        let setup = SessionSetup::new(BoardType::Standard8x8, Speed::Standard, config);
        let (_task, handle) = Session::spawn(Uuid::new_v4(), setup);

        handle.submit(Intent::Ready { player: Player::new(1) }).await.unwrap();
        handle.submit(Intent::Ready { player: Player::new(2) }).await.unwrap();

        let outcome = handle
            .submit(Intent::Move {
                player: Player::new(1),
                piece_id: PieceId(24),
                to: (4, 4),
            })
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            IntentOutcome::MoveRejected {
                reason: engine::MoveRejection::NotYourPiece,
                ..
            }
        ));

        handle.shutdown();
    }

    #[tokio::test]
    async fn a_fresh_subscriber_immediately_receives_a_full_snapshot() {
        let config = Config {
            tick_rate_hz: 50,
            idle_reap_secs: 1,
            mailbox_capacity: 16,
            subscriber_buffer_capacity: 16,
        };
        let setup = SessionSetup::new(BoardType::Standard8x8, Speed::Standard, config);
        let (_task, handle) = Session::spawn(Uuid::new_v4(), setup);

        let (snapshot, _receiver) = handle.subscribe();
        assert_eq!(snapshot.pieces.len(), 32);

        handle.shutdown();
    }
}
