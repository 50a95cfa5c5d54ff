#![allow(dead_code)]
//! The envelope and message catalog of the session protocol: every inbound
//! and outbound frame is one JSON object, keys in snake_case, enums as
//! snake_case string tags, matching exhaustively.

use serde::{Deserialize, Serialize};

use crate::rules_engine::domain::player::PlayerId;
use crate::rules_engine::domain::state::{GameConfig, RosterEntry};
use crate::rules_engine::events::Event;
use crate::rules_engine::intents::Intent;
use crate::rules_engine::violations::Violation;
use crate::shared::errors::{LobbyErrorKind, ProtocolErrorCode};

pub const CURRENT_PROTOCOL_VERSION: ProtocolVersion = ProtocolVersion { major: 1, minor: 0 };
pub const MIN_SUPPORTED_PROTOCOL_VERSION: ProtocolVersion = ProtocolVersion { major: 1, minor: 0 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProtocolVersion {
    pub major: u16,
    pub minor: u16,
}

impl ProtocolVersion {
    pub fn is_supported(&self) -> bool {
        (MIN_SUPPORTED_PROTOCOL_VERSION..=CURRENT_PROTOCOL_VERSION).contains(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEnvelope {
    pub protocol_version: ProtocolVersion,
    pub request_id: String,
    pub last_seen_event_index: Option<u64>,
    pub sent_at: String,
    pub message: ClientMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundEnvelope {
    pub protocol_version: ProtocolVersion,
    pub correlation_id: Option<String>,
    pub sent_at: String,
    pub message: ServerMessage,
}

impl OutboundEnvelope {
    pub fn reply(correlation_id: Option<String>, sent_at: impl Into<String>, message: ServerMessage) -> Self {
        OutboundEnvelope {
            protocol_version: CURRENT_PROTOCOL_VERSION,
            correlation_id,
            sent_at: sent_at.into(),
            message,
        }
    }
}

/// The client catalog is split into control-plane messages (auth, lobby,
/// session) and in-game intents. Untagged so a game intent's own `type`
/// tag (`roll_dice`, `build_road`, ...) is matched directly without a
/// second wrapping tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientMessage {
    Control(ControlMessage),
    Game(Intent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlMessage {
    Authenticate { token: String },
    Ping,
    CreateLobby { name: String, player_mode: crate::rules_engine::domain::state::PlayerMode, use_beginner_layout: bool },
    JoinLobby { code: String },
    LeaveLobby,
    SelectColor { color: String },
    SetReady { ready: bool },
    StartGame,
    GetSessionState,
    Reconnect { last_seen_event_index: Option<u64> },
    SupplyTrade { proposal_id: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LobbyMemberView {
    pub user_id: PlayerId,
    pub display_name: String,
    pub color: Option<String>,
    pub ready: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LobbyView {
    pub id: String,
    pub code: String,
    pub name: String,
    pub host_user_id: PlayerId,
    pub player_mode: crate::rules_engine::domain::state::PlayerMode,
    pub use_beginner_layout: bool,
    pub members: Vec<LobbyMemberView>,
    pub status: String,
    pub game_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameReconnectedPayload {
    pub player_order: Vec<PlayerId>,
    pub board_seed: u64,
    pub config: GameConfig,
    pub roster: Vec<RosterEntry>,
    pub current_turn: PlayerId,
    pub start_index: u64,
    pub end_index: u64,
    pub tail_events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    ProtocolError { code: ProtocolErrorCode, message: String },
    Authenticated { user_id: PlayerId, display_name: String },
    AuthenticationFailed { message: String },
    LobbyCreated { lobby: LobbyView },
    LobbyJoined { lobby: LobbyView },
    LobbyUpdated { lobby: LobbyView },
    LobbyLeft,
    LobbyError { kind: LobbyErrorKind, message: String },
    GameStarted { game_id: String },
    GameEvents { game_id: String, start_index: u64, end_index: u64, events: Vec<Event> },
    GameSnapshot { game_id: String, event_index: u64 },
    GameReconnected(GameReconnectedPayload),
    IntentRejected { request_id: String, violations: Vec<Violation> },
    GameEnded { game_id: String, winner: PlayerId },
    SessionState { user_id: Option<PlayerId>, lobby: Option<LobbyView>, game_id: Option<String> },
    Pong,
    ServerShutdown,
}
