#![allow(dead_code)]
//! The explicit dependencies every connection handler needs, passed in
//! rather than reached for through a process-wide singleton (§9's "global
//! singletons" note: pass them as explicit dependencies instead).

use std::sync::Arc;

use crate::cosmos_db::database_abstractions::DatabaseWrapper;
use crate::lobby::service::LobbyService;
use crate::runtime::registry::GameRegistry;

pub struct AppState {
    pub db: Arc<DatabaseWrapper>,
    pub games: Arc<GameRegistry>,
    pub lobbies: Arc<LobbyService>,
}

impl AppState {
    pub fn new(db: Arc<DatabaseWrapper>) -> Arc<Self> {
        let games = GameRegistry::new(db.clone());
        let lobbies = LobbyService::new(db.clone(), games.clone());
        Arc::new(AppState { db, games, lobbies })
    }
}
