pub mod cosmosdb;
pub mod database_abstractions;
pub mod mocked_db;

pub use database_abstractions::{Database, DatabaseWrapper, GameDbTrait, LobbyDbTrait, UserDbTrait};
