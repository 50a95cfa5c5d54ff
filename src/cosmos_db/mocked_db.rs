#![allow(dead_code)]
//! In-memory stand-in for Cosmos, used by the test harness and by default
//! when no config file is present. Mirrors the real store's contiguity
//! rule so tests exercise the same invariant production does.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::auth::users::PersistUser;
use crate::lobby::lobby::PersistLobby;
use crate::rules_engine::events::EventRecord;
use crate::shared::errors::EngineError;

use super::database_abstractions::{PersistGame, SnapshotRecord};

#[derive(Default)]
struct GameLog {
    game: Option<PersistGame>,
    events: Vec<EventRecord>,
    snapshots: Vec<SnapshotRecord>,
}

pub struct MemoryStore {
    games: Arc<RwLock<HashMap<String, GameLog>>>,
    users: Arc<RwLock<HashMap<String, PersistUser>>>,
    sessions: Arc<RwLock<HashMap<String, (String, i64)>>>,
    lobbies: Arc<RwLock<HashMap<String, PersistLobby>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            games: Arc::new(RwLock::new(HashMap::new())),
            users: Arc::new(RwLock::new(HashMap::new())),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            lobbies: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl super::database_abstractions::GameDbTrait for MemoryStore {
    async fn load_game(&self, game_id: &str) -> Result<PersistGame, EngineError> {
        self.games
            .read()
            .await
            .get(game_id)
            .and_then(|log| log.game.clone())
            .ok_or_else(|| EngineError::GameNotFound(game_id.to_string()))
    }

    async fn upsert_game(&self, game: &PersistGame) -> Result<(), EngineError> {
        let mut guard = self.games.write().await;
        let log = guard.entry(game.id.clone()).or_default();
        log.game = Some(game.clone());
        Ok(())
    }

    async fn delete_game(&self, game_id: &str) -> Result<(), EngineError> {
        self.games.write().await.remove(game_id);
        Ok(())
    }

    async fn append_event(&self, game_id: &str, record: EventRecord) -> Result<(), EngineError> {
        let mut guard = self.games.write().await;
        let log = guard.entry(game_id.to_string()).or_default();
        let expected = log.events.last().map(|e| e.event_index + 1).unwrap_or(1);
        if record.event_index != expected {
            return Err(EngineError::NonContiguousAppend {
                game_id: game_id.to_string(),
                expected_index: expected,
                got_index: record.event_index,
            });
        }
        log.events.push(record);
        Ok(())
    }

    async fn load_events_after(&self, game_id: &str, after_index: u64) -> Result<Vec<EventRecord>, EngineError> {
        let guard = self.games.read().await;
        Ok(guard
            .get(game_id)
            .map(|log| log.events.iter().filter(|e| e.event_index > after_index).cloned().collect())
            .unwrap_or_default())
    }

    async fn highest_event_index(&self, game_id: &str) -> Result<Option<u64>, EngineError> {
        let guard = self.games.read().await;
        Ok(guard.get(game_id).and_then(|log| log.events.last().map(|e| e.event_index)))
    }

    async fn write_snapshot(&self, snapshot: SnapshotRecord) -> Result<(), EngineError> {
        let mut guard = self.games.write().await;
        let log = guard.entry(snapshot.game_id.clone()).or_default();
        log.snapshots.push(snapshot);
        Ok(())
    }

    async fn latest_snapshot(&self, game_id: &str) -> Result<Option<SnapshotRecord>, EngineError> {
        let guard = self.games.read().await;
        Ok(guard.get(game_id).and_then(|log| log.snapshots.iter().max_by_key(|s| s.event_index).cloned()))
    }
}

#[async_trait]
impl super::database_abstractions::UserDbTrait for MemoryStore {
    async fn find_user_by_identifier(&self, identifier: &str) -> Result<Option<PersistUser>, EngineError> {
        Ok(self.users.read().await.values().find(|u| u.identifier == identifier).cloned())
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<PersistUser>, EngineError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn create_user(&self, user: &PersistUser) -> Result<(), EngineError> {
        self.users.write().await.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn store_session(&self, user_id: &str, token: &str, expires_at: i64) -> Result<(), EngineError> {
        self.sessions.write().await.insert(token.to_string(), (user_id.to_string(), expires_at));
        Ok(())
    }

    async fn find_session(&self, token: &str) -> Result<Option<String>, EngineError> {
        Ok(self.sessions.read().await.get(token).map(|(user_id, _)| user_id.clone()))
    }

    async fn revoke_session(&self, token: &str) -> Result<(), EngineError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}

#[async_trait]
impl super::database_abstractions::LobbyDbTrait for MemoryStore {
    async fn find_lobby_by_code(&self, code: &str) -> Result<Option<PersistLobby>, EngineError> {
        Ok(self.lobbies.read().await.values().find(|l| l.code == code).cloned())
    }

    async fn find_lobby_by_id(&self, id: &str) -> Result<Option<PersistLobby>, EngineError> {
        Ok(self.lobbies.read().await.get(id).cloned())
    }

    async fn find_waiting_lobby_for_user(&self, user_id: &str) -> Result<Option<PersistLobby>, EngineError> {
        Ok(self
            .lobbies
            .read()
            .await
            .values()
            .find(|l| l.status == crate::lobby::lobby::LobbyStatus::Waiting && l.members.iter().any(|m| m.user_id == user_id))
            .cloned())
    }

    async fn upsert_lobby(&self, lobby: &PersistLobby) -> Result<(), EngineError> {
        self.lobbies.write().await.insert(lobby.id.clone(), lobby.clone());
        Ok(())
    }

    async fn delete_lobby(&self, id: &str) -> Result<(), EngineError> {
        self.lobbies.write().await.remove(id);
        Ok(())
    }

    async fn code_taken(&self, code: &str) -> Result<bool, EngineError> {
        Ok(self.lobbies.read().await.values().any(|l| l.code == code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosmos_db::database_abstractions::GameDbTrait;

    #[tokio::test]
    async fn append_rejects_gaps() {
        let store = MemoryStore::new();
        store.append_event("g1", EventRecord { event_index: 1, event: test_event() }).await.unwrap();
        let err = store.append_event("g1", EventRecord { event_index: 3, event: test_event() }).await.unwrap_err();
        assert!(matches!(err, EngineError::NonContiguousAppend { .. }));
    }

    fn test_event() -> crate::rules_engine::events::Event {
        crate::rules_engine::events::Event::SetupPhaseEnded
    }
}
