#![allow(dead_code)]
//! Process-wide game-id → runtime map. Games are created once (by the
//! lobby service, on start) and looked up by every subsequent gateway
//! dispatch; never removed except on explicit deletion, matching the
//! process-lifetime scope §9 calls for on its "global singletons" note.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cosmos_db::database_abstractions::DatabaseWrapper;
use crate::rules_engine::domain::state::GameState;
use crate::rules_engine::rng::CatanRng;
use crate::shared::errors::EngineError;

use super::game_runtime::GameRuntime;

pub struct GameRegistry {
    db: Arc<DatabaseWrapper>,
    runtimes: RwLock<HashMap<String, Arc<GameRuntime>>>,
}

impl GameRegistry {
    pub fn new(db: Arc<DatabaseWrapper>) -> Arc<Self> {
        Arc::new(GameRegistry { db, runtimes: RwLock::new(HashMap::new()) })
    }

    pub async fn create(&self, state: GameState, rng: CatanRng) -> Arc<GameRuntime> {
        let runtime = GameRuntime::new(state, rng, self.db.clone());
        self.runtimes.write().await.insert(runtime.game_id().to_string(), runtime.clone());
        runtime
    }

    pub async fn get(&self, game_id: &str) -> Option<Arc<GameRuntime>> {
        self.runtimes.read().await.get(game_id).cloned()
    }

    /// Looks the runtime up in memory, falling back to snapshot+replay
    /// recovery — the path exercised after a process restart per §4.8.
    pub async fn get_or_recover(&self, game_id: &str) -> Result<Arc<GameRuntime>, EngineError> {
        if let Some(runtime) = self.get(game_id).await {
            return Ok(runtime);
        }
        let runtime = GameRuntime::recover(game_id, self.db.clone()).await?;
        self.runtimes.write().await.insert(game_id.to_string(), runtime.clone());
        Ok(runtime)
    }
}
