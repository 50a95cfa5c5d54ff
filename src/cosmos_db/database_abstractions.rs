#![allow(dead_code)]
use async_trait::async_trait;
use azure_data_cosmos::CosmosEntity;

use crate::auth::users::PersistUser;
use crate::lobby::lobby::PersistLobby;
use crate::rules_engine::events::EventRecord;
use crate::shared::errors::EngineError;

use super::cosmosdb::CosmosStore;
use super::mocked_db::MemoryStore;

/// Every collection in this service is small enough to live in one
/// partition, the same tradeoff the account's other Cosmos containers
/// make, so every document carries this constant partition key.
pub const SINGLE_PARTITION_KEY: u64 = 1;

/// One row of `games(...)` per §6 — the record the runtime keeps up to
/// date alongside the event log.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PersistGame {
    pub id: String,
    pub player_mode: crate::rules_engine::domain::state::PlayerMode,
    pub use_beginner_layout: bool,
    pub board_seed: u64,
    pub players_json: String,
    pub status: GameStatus,
    pub winner_user_id: Option<String>,
    pub event_count: u64,
}

impl CosmosEntity for PersistGame {
    type Entity = u64;

    fn partition_key(&self) -> Self::Entity {
        SINGLE_PARTITION_KEY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Ended,
}

/// One row of `snapshots(...)`: a full game-state payload at a given event
/// index, used so reconnection and restart never replay from index 0.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SnapshotRecord {
    pub game_id: String,
    pub event_index: u64,
    pub state_payload_json: String,
}

#[async_trait]
pub trait GameDbTrait: Send + Sync {
    async fn load_game(&self, game_id: &str) -> Result<PersistGame, EngineError>;
    async fn upsert_game(&self, game: &PersistGame) -> Result<(), EngineError>;
    async fn delete_game(&self, game_id: &str) -> Result<(), EngineError>;

    /// Appends one event. The store must reject an append whose index is
    /// not exactly one past the highest existing index for this game.
    async fn append_event(&self, game_id: &str, record: EventRecord) -> Result<(), EngineError>;
    async fn load_events_after(&self, game_id: &str, after_index: u64) -> Result<Vec<EventRecord>, EngineError>;
    async fn highest_event_index(&self, game_id: &str) -> Result<Option<u64>, EngineError>;

    async fn write_snapshot(&self, snapshot: SnapshotRecord) -> Result<(), EngineError>;
    async fn latest_snapshot(&self, game_id: &str) -> Result<Option<SnapshotRecord>, EngineError>;
}

#[async_trait]
pub trait UserDbTrait: Send + Sync {
    async fn find_user_by_identifier(&self, identifier: &str) -> Result<Option<PersistUser>, EngineError>;
    async fn find_user_by_id(&self, id: &str) -> Result<Option<PersistUser>, EngineError>;
    async fn create_user(&self, user: &PersistUser) -> Result<(), EngineError>;
    async fn store_session(&self, user_id: &str, token: &str, expires_at: i64) -> Result<(), EngineError>;
    async fn find_session(&self, token: &str) -> Result<Option<String>, EngineError>;
    async fn revoke_session(&self, token: &str) -> Result<(), EngineError>;
}

#[async_trait]
pub trait LobbyDbTrait: Send + Sync {
    async fn find_lobby_by_code(&self, code: &str) -> Result<Option<PersistLobby>, EngineError>;
    async fn find_lobby_by_id(&self, id: &str) -> Result<Option<PersistLobby>, EngineError>;
    async fn find_waiting_lobby_for_user(&self, user_id: &str) -> Result<Option<PersistLobby>, EngineError>;
    async fn upsert_lobby(&self, lobby: &PersistLobby) -> Result<(), EngineError>;
    async fn delete_lobby(&self, id: &str) -> Result<(), EngineError>;
    async fn code_taken(&self, code: &str) -> Result<bool, EngineError>;
}

/// Either a live Cosmos-backed store or the in-memory test double,
/// selected once at startup. Every trait impl just forwards to whichever
/// variant is active, so callers hold a `&dyn GameDbTrait`/`&dyn
/// UserDbTrait`/`&dyn LobbyDbTrait` and never match on this enum directly.
pub enum Database {
    Cosmos(CosmosStore),
    Memory(MemoryStore),
}

macro_rules! forward {
    ($self:ident, $method:ident ( $($arg:ident),* )) => {
        match $self {
            Database::Cosmos(db) => db.$method($($arg),*).await,
            Database::Memory(db) => db.$method($($arg),*).await,
        }
    };
}

#[async_trait]
impl GameDbTrait for Database {
    async fn load_game(&self, game_id: &str) -> Result<PersistGame, EngineError> {
        forward!(self, load_game(game_id))
    }
    async fn upsert_game(&self, game: &PersistGame) -> Result<(), EngineError> {
        forward!(self, upsert_game(game))
    }
    async fn delete_game(&self, game_id: &str) -> Result<(), EngineError> {
        forward!(self, delete_game(game_id))
    }
    async fn append_event(&self, game_id: &str, record: EventRecord) -> Result<(), EngineError> {
        forward!(self, append_event(game_id, record))
    }
    async fn load_events_after(&self, game_id: &str, after_index: u64) -> Result<Vec<EventRecord>, EngineError> {
        forward!(self, load_events_after(game_id, after_index))
    }
    async fn highest_event_index(&self, game_id: &str) -> Result<Option<u64>, EngineError> {
        forward!(self, highest_event_index(game_id))
    }
    async fn write_snapshot(&self, snapshot: SnapshotRecord) -> Result<(), EngineError> {
        forward!(self, write_snapshot(snapshot))
    }
    async fn latest_snapshot(&self, game_id: &str) -> Result<Option<SnapshotRecord>, EngineError> {
        forward!(self, latest_snapshot(game_id))
    }
}

#[async_trait]
impl UserDbTrait for Database {
    async fn find_user_by_identifier(&self, identifier: &str) -> Result<Option<PersistUser>, EngineError> {
        forward!(self, find_user_by_identifier(identifier))
    }
    async fn find_user_by_id(&self, id: &str) -> Result<Option<PersistUser>, EngineError> {
        forward!(self, find_user_by_id(id))
    }
    async fn create_user(&self, user: &PersistUser) -> Result<(), EngineError> {
        forward!(self, create_user(user))
    }
    async fn store_session(&self, user_id: &str, token: &str, expires_at: i64) -> Result<(), EngineError> {
        forward!(self, store_session(user_id, token, expires_at))
    }
    async fn find_session(&self, token: &str) -> Result<Option<String>, EngineError> {
        forward!(self, find_session(token))
    }
    async fn revoke_session(&self, token: &str) -> Result<(), EngineError> {
        forward!(self, revoke_session(token))
    }
}

#[async_trait]
impl LobbyDbTrait for Database {
    async fn find_lobby_by_code(&self, code: &str) -> Result<Option<PersistLobby>, EngineError> {
        forward!(self, find_lobby_by_code(code))
    }
    async fn find_lobby_by_id(&self, id: &str) -> Result<Option<PersistLobby>, EngineError> {
        forward!(self, find_lobby_by_id(id))
    }
    async fn find_waiting_lobby_for_user(&self, user_id: &str) -> Result<Option<PersistLobby>, EngineError> {
        forward!(self, find_waiting_lobby_for_user(user_id))
    }
    async fn upsert_lobby(&self, lobby: &PersistLobby) -> Result<(), EngineError> {
        forward!(self, upsert_lobby(lobby))
    }
    async fn delete_lobby(&self, id: &str) -> Result<(), EngineError> {
        forward!(self, delete_lobby(id))
    }
    async fn code_taken(&self, code: &str) -> Result<bool, EngineError> {
        forward!(self, code_taken(code))
    }
}

/// Thin owning wrapper so call sites hold one object and borrow it as
/// whichever trait they need, exactly the shape the rest of this service's
/// handler layer expects from its persistence dependency.
pub struct DatabaseWrapper {
    db: Database,
}

impl DatabaseWrapper {
    pub fn new_memory() -> Self {
        DatabaseWrapper { db: Database::Memory(MemoryStore::new()) }
    }

    pub fn new_cosmos(account: &str, token: &str, database_name: &str) -> Self {
        DatabaseWrapper { db: Database::Cosmos(CosmosStore::new(account, token, database_name)) }
    }

    pub fn as_game_db(&self) -> &dyn GameDbTrait {
        &self.db
    }

    pub fn as_user_db(&self) -> &dyn UserDbTrait {
        &self.db
    }

    pub fn as_lobby_db(&self) -> &dyn LobbyDbTrait {
        &self.db
    }
}
