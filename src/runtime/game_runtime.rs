#![allow(dead_code)]
//! One `GameRuntime` per live game, owning the only mutable handle to its
//! `GameState` and RNG. `submit` is the sole entry point and is serialized
//! by the `tokio::sync::Mutex` guarding the session — at most one
//! submission is ever in flight for a given game, exactly §4.8's
//! requirement, achieved with a mailbox-free mutex rather than a
//! dedicated actor mailbox.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, Mutex};

use crate::cosmos_db::database_abstractions::{DatabaseWrapper, GameStatus, PersistGame, SnapshotRecord};
use crate::full_info;
use crate::rules_engine::domain::state::GameState;
use crate::rules_engine::events::{Event, EventRecord};
use crate::rules_engine::intents::Intent;
use crate::rules_engine::reducer::reduce;
use crate::rules_engine::rng::CatanRng;
use crate::rules_engine::validator::validate;
use crate::rules_engine::violations::Violation;
use crate::shared::config::SERVICE_CONFIG;
use crate::shared::errors::EngineError;

#[derive(Debug, Clone)]
pub struct EventBatch {
    pub game_id: String,
    pub start_index: u64,
    pub end_index: u64,
    pub events: Vec<Event>,
    /// Connection that produced this batch via a direct `submit`, if any.
    /// The gateway's broadcast forwarder uses this to skip re-delivering a
    /// batch to the connection that already received it as the RPC reply.
    pub origin_connection: Option<String>,
}

pub enum SubmitOutcome {
    Accepted { start_index: u64, end_index: u64, events: Vec<Event> },
    Rejected(Vec<Violation>),
    InternalError(EngineError),
}

pub enum TailResult {
    Events { start_index: u64, end_index: u64, events: Vec<Event> },
    Snapshot { state: GameState, start_index: u64, end_index: u64, events: Vec<Event> },
}

/// Everything a running game needs behind one lock: the pure state plus
/// the RNG stream the reducer draws from. Snapshotted together so
/// recovery restores both in lockstep.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Session {
    state: GameState,
    rng: CatanRng,
}

pub struct GameRuntime {
    game_id: String,
    session: Mutex<Session>,
    db: Arc<DatabaseWrapper>,
    publisher: broadcast::Sender<EventBatch>,
}

impl GameRuntime {
    pub fn new(state: GameState, rng: CatanRng, db: Arc<DatabaseWrapper>) -> Arc<Self> {
        let (publisher, _) = broadcast::channel(256);
        Arc::new(GameRuntime { game_id: state.game_id.clone(), session: Mutex::new(Session { state, rng }), db, publisher })
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventBatch> {
        self.publisher.subscribe()
    }

    pub async fn current_state(&self) -> GameState {
        self.session.lock().await.state.clone()
    }

    /// Rebuilds a runtime from persisted state: latest snapshot (if any)
    /// replayed forward through every event after it, per §4.8's crash
    /// recovery rule. Event replay never touches the RNG, so its position
    /// is only as fresh as the last snapshot.
    pub async fn recover(game_id: &str, db: Arc<DatabaseWrapper>) -> Result<Arc<Self>, EngineError> {
        let snapshot = db.as_game_db().latest_snapshot(game_id).await?;
        let (mut state, rng, after_index): (GameState, CatanRng, u64) = match snapshot {
            Some(s) => {
                let session: Session = serde_json::from_str(&s.state_payload_json)?;
                (session.state, session.rng, s.event_index)
            }
            None => return Err(EngineError::SnapshotMissing { game_id: game_id.to_string() }),
        };
        let events = db.as_game_db().load_events_after(game_id, after_index).await?;
        for record in &events {
            state = crate::rules_engine::event_applier::apply(&record.event, state);
        }
        Ok(GameRuntime::new(state, rng, db))
    }

    pub async fn submit(&self, intent: Intent, origin_connection: Option<String>) -> SubmitOutcome {
        let mut guard = self.session.lock().await;

        let violations = validate(&intent, &guard.state);
        if !violations.is_empty() {
            return SubmitOutcome::Rejected(violations);
        }

        let highest_before = guard.state.event_count;
        let (mut new_state, events) = reduce(intent, guard.state.clone(), &mut guard.rng);
        if events.is_empty() {
            guard.state = new_state;
            return SubmitOutcome::Accepted { start_index: highest_before, end_index: highest_before, events: Vec::new() };
        }

        // Events are a totally ordered sequence indexed starting at 1.
        let start_index = highest_before + 1;
        for (offset, event) in events.iter().enumerate() {
            let index = start_index + offset as u64;
            let record = EventRecord { event_index: index, event: event.clone() };
            if let Err(e) = self.db.as_game_db().append_event(&self.game_id, record).await {
                full_info!("append_event failed for game {}: {}", self.game_id, e);
                return SubmitOutcome::InternalError(e);
            }
        }
        let end_index = start_index + events.len() as u64 - 1;
        new_state.event_count = end_index;

        let status = if new_state.turn.phase == crate::rules_engine::domain::turn::Phase::Ended {
            GameStatus::Ended
        } else {
            GameStatus::InProgress
        };
        let winner = events.iter().find_map(|e| match e {
            Event::PlayerWon { player, .. } => Some(player.clone()),
            _ => None,
        });
        let persisted = PersistGame {
            id: self.game_id.clone(),
            player_mode: new_state.config.player_mode,
            use_beginner_layout: new_state.config.use_beginner_layout,
            board_seed: new_state.config.board_seed,
            players_json: serde_json::to_string(&new_state.players).unwrap_or_default(),
            status,
            winner_user_id: winner,
            event_count: new_state.event_count,
        };
        if let Err(e) = self.db.as_game_db().upsert_game(&persisted).await {
            return SubmitOutcome::InternalError(e);
        }

        if end_index / SERVICE_CONFIG.snapshot_interval != highest_before / SERVICE_CONFIG.snapshot_interval
            || end_index % SERVICE_CONFIG.snapshot_interval == 0
        {
            let snapshot_session = Session { state: new_state.clone(), rng: guard.rng.clone() };
            if let Ok(payload) = serde_json::to_string(&snapshot_session) {
                let _ = self
                    .db
                    .as_game_db()
                    .write_snapshot(SnapshotRecord { game_id: self.game_id.clone(), event_index: end_index, state_payload_json: payload })
                    .await;
            }
        }

        guard.state = new_state;
        drop(guard);

        let _ = self.publisher.send(EventBatch {
            game_id: self.game_id.clone(),
            start_index,
            end_index,
            events: events.clone(),
            origin_connection,
        });

        SubmitOutcome::Accepted { start_index, end_index, events }
    }

    /// §4.8's reconnection tail query: events only when the gap is small,
    /// otherwise the latest snapshot plus the remaining tail.
    pub async fn reconnection_tail(&self, last_seen: Option<u64>) -> Result<TailResult, EngineError> {
        let guard = self.session.lock().await;
        let highest = guard.state.event_count;
        let low = last_seen.unwrap_or(0) as i64;
        let gap = highest as i64 - low;

        if last_seen.is_some() && gap >= 0 && (gap as u64) <= SERVICE_CONFIG.reconnect_tail_threshold {
            let events = self.db.as_game_db().load_events_after(&self.game_id, last_seen.unwrap()).await?;
            let start_index = last_seen.unwrap() + 1;
            return Ok(TailResult::Events { start_index, end_index: highest, events: events.into_iter().map(|r| r.event).collect() });
        }

        match self.db.as_game_db().latest_snapshot(&self.game_id).await? {
            Some(snapshot) => {
                let session: Session = serde_json::from_str(&snapshot.state_payload_json)?;
                let events = self.db.as_game_db().load_events_after(&self.game_id, snapshot.event_index).await?;
                Ok(TailResult::Snapshot {
                    state: session.state,
                    start_index: snapshot.event_index + 1,
                    end_index: highest,
                    events: events.into_iter().map(|r| r.event).collect(),
                })
            }
            None => {
                let events = self.db.as_game_db().load_events_after(&self.game_id, 0).await?;
                Ok(TailResult::Events { start_index: 1, end_index: highest, events: events.into_iter().map(|r| r.event).collect() })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules_engine::domain::state::{GameConfig, PlayerMode, RosterEntry};

    fn roster() -> Vec<RosterEntry> {
        vec![
            RosterEntry { id: "a".into(), display_name: "A".into(), color: "red".into() },
            RosterEntry { id: "b".into(), display_name: "B".into(), color: "blue".into() },
            RosterEntry { id: "c".into(), display_name: "C".into(), color: "orange".into() },
        ]
    }

    #[tokio::test]
    async fn accepted_submission_advances_event_count() {
        let config = GameConfig { player_mode: PlayerMode::ThreeOrFour, use_beginner_layout: true, board_seed: 1 };
        let (state, rng) = GameState::new("g1".into(), config, roster());
        let db = Arc::new(DatabaseWrapper::new_memory());
        let runtime = GameRuntime::new(state, rng, db);
        let player = runtime.current_state().await.turn.active_player.clone();
        let node = runtime.current_state().await.board.nodes()[0].id;
        let outcome = runtime.submit(Intent::PlaceSetupSettlement { player, node }, None).await;
        match outcome {
            SubmitOutcome::Accepted { start_index, end_index, .. } => assert!(end_index >= start_index),
            _ => panic!("expected acceptance"),
        }
        assert_eq!(runtime.current_state().await.event_count, 1);
    }

    /// Reconnecting with `last_seen = 42` against a game that has committed
    /// 46 events (indices 1..=46) should return the four events the client
    /// missed rather than falling back to a snapshot, since the gap is well
    /// under the configured threshold.
    #[tokio::test]
    async fn reconnection_tail_returns_the_missed_events_within_threshold() {
        let config = GameConfig { player_mode: PlayerMode::ThreeOrFour, use_beginner_layout: true, board_seed: 1 };
        let (mut state, rng) = GameState::new("g1".into(), config, roster());
        let db = Arc::new(DatabaseWrapper::new_memory());
        for index in 1..=46u64 {
            let record = EventRecord { event_index: index, event: Event::SetupPhaseEnded };
            db.as_game_db().append_event("g1", record).await.unwrap();
        }
        state.event_count = 46;
        let runtime = GameRuntime::new(state, rng, db);

        match runtime.reconnection_tail(Some(42)).await.unwrap() {
            TailResult::Events { start_index, end_index, events } => {
                assert_eq!(start_index, 43);
                assert_eq!(end_index, 46);
                assert_eq!(events.len(), 4);
            }
            TailResult::Snapshot { .. } => panic!("expected the small-gap events branch, not a snapshot fallback"),
        }
    }

    /// A gap past the threshold with no snapshot ever written falls back to
    /// replaying the full event log from index one.
    #[tokio::test]
    async fn reconnection_tail_falls_back_to_full_replay_without_a_snapshot() {
        let config = GameConfig { player_mode: PlayerMode::ThreeOrFour, use_beginner_layout: true, board_seed: 1 };
        let (mut state, rng) = GameState::new("g1".into(), config, roster());
        let db = Arc::new(DatabaseWrapper::new_memory());
        for index in 1..=200u64 {
            let record = EventRecord { event_index: index, event: Event::SetupPhaseEnded };
            db.as_game_db().append_event("g1", record).await.unwrap();
        }
        state.event_count = 200;
        let runtime = GameRuntime::new(state, rng, db);

        match runtime.reconnection_tail(Some(1)).await.unwrap() {
            TailResult::Events { start_index, end_index, events } => {
                assert_eq!(start_index, 1);
                assert_eq!(end_index, 200);
                assert_eq!(events.len(), 200);
            }
            TailResult::Snapshot { .. } => panic!("no snapshot was ever written, so replay must start from index one"),
        }
    }
}
