#![allow(dead_code)]
//! §4.11's operations. The persisted `PersistLobby` record is the source
//! of truth; "the user's current lobby" is always resolved by scanning
//! waiting lobbies rather than trusting connection-local state.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::cosmos_db::database_abstractions::DatabaseWrapper;
use crate::rules_engine::domain::player::PlayerId;
use crate::rules_engine::domain::state::{GameConfig, GameState, PlayerMode, RosterEntry};
use crate::runtime::registry::GameRegistry;
use crate::shared::errors::{LobbyError, LobbyErrorKind};

use super::lobby::{LobbyMember, LobbyStatus, PersistLobby};

const CODE_ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";
const CODE_LEN: usize = 4;

pub struct LobbyService {
    db: Arc<DatabaseWrapper>,
    games: Arc<GameRegistry>,
}

impl LobbyService {
    pub fn new(db: Arc<DatabaseWrapper>, games: Arc<GameRegistry>) -> Arc<Self> {
        Arc::new(LobbyService { db, games })
    }

    async fn generate_code(&self) -> Result<String, LobbyError> {
        let mut rng = thread_rng();
        for _ in 0..32 {
            let code: String = (0..CODE_LEN).map(|_| *CODE_ALPHABET.choose(&mut rng).unwrap() as char).collect();
            match self.db.as_lobby_db().code_taken(&code).await {
                Ok(false) => return Ok(code),
                Ok(true) => continue,
                Err(e) => return Err(LobbyError::new(LobbyErrorKind::NotFound, e.to_string())),
            }
        }
        Err(LobbyError::new(LobbyErrorKind::NotFound, "exhausted code space"))
    }

    pub async fn create(
        &self,
        host_id: PlayerId,
        host_name: String,
        name: String,
        player_mode: PlayerMode,
        use_beginner_layout: bool,
    ) -> Result<PersistLobby, LobbyError> {
        if self.current_lobby_for(&host_id).await?.is_some() {
            return Err(LobbyError::new(LobbyErrorKind::AlreadyInLobby, "already in a lobby"));
        }
        let code = self.generate_code().await?;
        let host = LobbyMember::new(host_id, host_name);
        let lobby = PersistLobby::new(code, name, host, player_mode, use_beginner_layout);
        self.persist(&lobby).await?;
        Ok(lobby)
    }

    pub async fn current_lobby_for(&self, user_id: &str) -> Result<Option<PersistLobby>, LobbyError> {
        self.db
            .as_lobby_db()
            .find_waiting_lobby_for_user(user_id)
            .await
            .map_err(|e| LobbyError::new(LobbyErrorKind::NotFound, e.to_string()))
    }

    pub async fn join(&self, code: &str, user_id: PlayerId, display_name: String) -> Result<PersistLobby, LobbyError> {
        let mut lobby = self.load_by_code(code).await?;
        if lobby.status != LobbyStatus::Waiting {
            return Err(LobbyError::new(LobbyErrorKind::GameAlreadyStarted, "lobby already started"));
        }
        if lobby.members.len() >= lobby.player_mode.max_players() {
            return Err(LobbyError::new(LobbyErrorKind::Full, "lobby is full"));
        }
        if lobby.member(&user_id).is_none() {
            lobby.members.push(LobbyMember::new(user_id, display_name));
        }
        self.persist(&lobby).await?;
        Ok(lobby)
    }

    pub async fn leave(&self, lobby_id: &str, user_id: &str) -> Result<Option<PersistLobby>, LobbyError> {
        let mut lobby = self.load_by_id(lobby_id).await?;
        lobby.members.retain(|m| m.user_id != user_id);
        if lobby.members.is_empty() {
            self.db
                .as_lobby_db()
                .delete_lobby(&lobby.id)
                .await
                .map_err(|e| LobbyError::new(LobbyErrorKind::NotFound, e.to_string()))?;
            return Ok(None);
        }
        if lobby.host_user_id == user_id {
            lobby.host_user_id = lobby.members[0].user_id.clone();
        }
        self.persist(&lobby).await?;
        Ok(Some(lobby))
    }

    pub async fn select_color(&self, lobby_id: &str, user_id: &str, color: String) -> Result<PersistLobby, LobbyError> {
        let mut lobby = self.load_by_id(lobby_id).await?;
        if lobby.members.iter().any(|m| m.user_id != user_id && m.color.as_deref() == Some(color.as_str())) {
            return Err(LobbyError::new(LobbyErrorKind::ColorTaken, "color already taken"));
        }
        let member = lobby
            .member_mut(user_id)
            .ok_or_else(|| LobbyError::new(LobbyErrorKind::NotFound, "not a member"))?;
        member.color = Some(color);
        self.persist(&lobby).await?;
        Ok(lobby)
    }

    pub async fn set_ready(&self, lobby_id: &str, user_id: &str, ready: bool) -> Result<PersistLobby, LobbyError> {
        let mut lobby = self.load_by_id(lobby_id).await?;
        let member = lobby
            .member_mut(user_id)
            .ok_or_else(|| LobbyError::new(LobbyErrorKind::NotFound, "not a member"))?;
        member.ready = ready;
        self.persist(&lobby).await?;
        Ok(lobby)
    }

    pub async fn start(&self, lobby_id: &str, caller: &str) -> Result<(PersistLobby, String), LobbyError> {
        let mut lobby = self.load_by_id(lobby_id).await?;
        if lobby.host_user_id != caller {
            return Err(LobbyError::new(LobbyErrorKind::NotHost, "only the host may start the game"));
        }
        if !lobby.is_ready_to_start() {
            return Err(LobbyError::new(LobbyErrorKind::NotEnoughPlayers, "not every member is ready with a color"));
        }
        let roster = lobby
            .members
            .iter()
            .map(|m| RosterEntry { id: m.user_id.clone(), display_name: m.display_name.clone(), color: m.color.clone().unwrap() })
            .collect();
        let game_id = uuid::Uuid::new_v4().to_string();
        let board_seed = rand::random();
        let config = GameConfig { player_mode: lobby.player_mode, use_beginner_layout: lobby.use_beginner_layout, board_seed };
        let (state, rng) = GameState::new(game_id.clone(), config, roster);
        self.games.create(state, rng).await;

        lobby.status = LobbyStatus::Started;
        lobby.game_id = Some(game_id.clone());
        self.persist(&lobby).await?;
        Ok((lobby, game_id))
    }

    async fn load_by_code(&self, code: &str) -> Result<PersistLobby, LobbyError> {
        self.db
            .as_lobby_db()
            .find_lobby_by_code(code)
            .await
            .map_err(|e| LobbyError::new(LobbyErrorKind::NotFound, e.to_string()))?
            .ok_or_else(|| LobbyError::new(LobbyErrorKind::NotFound, "no lobby with that code"))
    }

    async fn load_by_id(&self, id: &str) -> Result<PersistLobby, LobbyError> {
        self.db
            .as_lobby_db()
            .find_lobby_by_id(id)
            .await
            .map_err(|e| LobbyError::new(LobbyErrorKind::NotFound, e.to_string()))?
            .ok_or_else(|| LobbyError::new(LobbyErrorKind::NotFound, "no such lobby"))
    }

    async fn persist(&self, lobby: &PersistLobby) -> Result<(), LobbyError> {
        self.db
            .as_lobby_db()
            .upsert_lobby(lobby)
            .await
            .map_err(|e| LobbyError::new(LobbyErrorKind::NotFound, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_join_adds_second_member() {
        let db = Arc::new(DatabaseWrapper::new_memory());
        let games = GameRegistry::new(db.clone());
        let service = LobbyService::new(db, games);
        let lobby = service.create("host".into(), "Host".into(), "Game Night".into(), PlayerMode::ThreeOrFour, true).await.unwrap();
        let joined = service.join(&lobby.code, "guest".into(), "Guest".into()).await.unwrap();
        assert_eq!(joined.members.len(), 2);
    }

    #[tokio::test]
    async fn start_requires_host_and_readiness() {
        let db = Arc::new(DatabaseWrapper::new_memory());
        let games = GameRegistry::new(db.clone());
        let service = LobbyService::new(db, games);
        let lobby = service.create("host".into(), "Host".into(), "Game Night".into(), PlayerMode::ThreeOrFour, true).await.unwrap();
        let err = service.start(&lobby.id, "host").await.unwrap_err();
        assert_eq!(err.kind, LobbyErrorKind::NotEnoughPlayers);
    }
}
