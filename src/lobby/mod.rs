pub mod lobby;
pub mod service;

pub use lobby::{LobbyMember, LobbyStatus, PersistLobby};
pub use service::LobbyService;
