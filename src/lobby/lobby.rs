#![allow(dead_code)]
//! The `lobbies(...)` relation of §6 and the pure data model that backs
//! the §4.11 operations. Code generation and the operations themselves
//! live in `service.rs`; this module is just the persisted shape.

use azure_data_cosmos::CosmosEntity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cosmos_db::database_abstractions::SINGLE_PARTITION_KEY;
use crate::rules_engine::domain::player::PlayerId;
use crate::rules_engine::domain::state::PlayerMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LobbyStatus {
    Waiting,
    Started,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LobbyMember {
    pub user_id: PlayerId,
    pub display_name: String,
    pub color: Option<String>,
    pub ready: bool,
}

impl LobbyMember {
    pub fn new(user_id: PlayerId, display_name: String) -> Self {
        LobbyMember { user_id, display_name, color: None, ready: false }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistLobby {
    pub id: String,
    pub code: String,
    pub name: String,
    pub host_user_id: PlayerId,
    pub player_mode: PlayerMode,
    pub use_beginner_layout: bool,
    pub members: Vec<LobbyMember>,
    pub status: LobbyStatus,
    pub game_id: Option<String>,
}

impl CosmosEntity for PersistLobby {
    type Entity = u64;

    fn partition_key(&self) -> Self::Entity {
        SINGLE_PARTITION_KEY
    }
}

impl PersistLobby {
    pub fn new(code: String, name: String, host: LobbyMember, player_mode: PlayerMode, use_beginner_layout: bool) -> Self {
        PersistLobby {
            id: Uuid::new_v4().to_string(),
            code,
            name,
            host_user_id: host.user_id.clone(),
            player_mode,
            use_beginner_layout,
            members: vec![host],
            status: LobbyStatus::Waiting,
            game_id: None,
        }
    }

    pub fn member(&self, user_id: &str) -> Option<&LobbyMember> {
        self.members.iter().find(|m| m.user_id == user_id)
    }

    pub fn member_mut(&mut self, user_id: &str) -> Option<&mut LobbyMember> {
        self.members.iter_mut().find(|m| m.user_id == user_id)
    }

    pub fn is_ready_to_start(&self) -> bool {
        self.members.len() >= self.player_mode.min_players()
            && self.members.len() <= self.player_mode.max_players()
            && self.members.iter().all(|m| m.ready && m.color.is_some())
    }
}
