#![allow(dead_code)]
//! The three error kinds of §7: engine faults, protocol faults, and lobby
//! faults. Rule violations are not an error type at all — they are data,
//! produced by `rules_engine::validator` and returned alongside a normal
//! `accepted`/`rejected` result.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Internal engine/store/runtime faults: persistence I/O, a broken
/// invariant, a serialization failure. Never surfaced to a client as-is;
/// the gateway maps every variant to `protocol_error(internal_error)`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum EngineError {
    Store(String),
    NonContiguousAppend { game_id: String, expected_index: u64, got_index: u64 },
    SnapshotMissing { game_id: String },
    GameNotFound(String),
    Serde(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Store(msg) => write!(f, "store error: {msg}"),
            EngineError::NonContiguousAppend { game_id, expected_index, got_index } => write!(
                f,
                "non-contiguous event append for game {game_id}: expected index {expected_index}, got {got_index}"
            ),
            EngineError::SnapshotMissing { game_id } => write!(f, "no snapshot for game {game_id}"),
            EngineError::GameNotFound(id) => write!(f, "game not found: {id}"),
            EngineError::Serde(msg) => write!(f, "serialization error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serde(err.to_string())
    }
}

impl From<azure_core::Error> for EngineError {
    fn from(err: azure_core::Error) -> Self {
        EngineError::Store(err.to_string())
    }
}

/// Protocol-level faults, carried on the wire as `protocol_error` envelopes.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolErrorCode {
    UnsupportedVersion,
    MalformedMessage,
    Unauthorized,
    RateLimited,
    InternalError,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GatewayError {
    pub code: ProtocolErrorCode,
    pub message: String,
}

impl GatewayError {
    pub fn new(code: ProtocolErrorCode, message: impl Into<String>) -> Self {
        GatewayError { code, message: message.into() }
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        GatewayError::new(ProtocolErrorCode::InternalError, err.to_string())
    }
}

impl From<EngineError> for GatewayError {
    fn from(err: EngineError) -> Self {
        GatewayError::internal(err)
    }
}

/// Lobby-level faults (§7), distinct from rule violations so a client can
/// present them differently.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LobbyErrorKind {
    NotFound,
    Full,
    AlreadyInLobby,
    ColorTaken,
    NotHost,
    NotEnoughPlayers,
    GameAlreadyStarted,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LobbyError {
    pub kind: LobbyErrorKind,
    pub message: String,
}

impl LobbyError {
    pub fn new(kind: LobbyErrorKind, message: impl Into<String>) -> Self {
        LobbyError { kind, message: message.into() }
    }
}

impl fmt::Display for LobbyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}
