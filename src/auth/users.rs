#![allow(dead_code)]
//! The `users` relation of §6 plus the registration/login flow that backs
//! it. Passwords are never stored or logged; only a bcrypt hash is kept.

use azure_data_cosmos::CosmosEntity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cosmos_db::database_abstractions::SINGLE_PARTITION_KEY;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PersistUser {
    pub id: String,
    pub identifier: String, // email or handle, unique
    pub display_name: String,
    pub password_hash: String,
    pub created_at: String,
}

impl CosmosEntity for PersistUser {
    type Entity = u64;

    fn partition_key(&self) -> Self::Entity {
        SINGLE_PARTITION_KEY
    }
}

impl PersistUser {
    pub fn new(identifier: &str, display_name: &str, password: &str) -> Result<Self, bcrypt::BcryptError> {
        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
        Ok(PersistUser {
            id: Uuid::new_v4().to_string(),
            identifier: identifier.to_string(),
            display_name: display_name.to_string(),
            password_hash,
            created_at: chrono_now_iso8601(),
        })
    }

    pub fn verify_password(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.password_hash).unwrap_or(false)
    }
}

/// No `chrono` dependency in this stack, so timestamps are built from
/// `SystemTime` directly: whole seconds since epoch, formatted manually.
pub fn chrono_now_iso8601() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    format!("{secs}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_roundtrips_through_bcrypt() {
        let user = PersistUser::new("a@b.com", "Alice", "hunter2").unwrap();
        assert!(user.verify_password("hunter2"));
        assert!(!user.verify_password("wrong"));
    }
}
