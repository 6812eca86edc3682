//! User accounts used by the authentication layer.
//!
//! The catalog services never look at users; only the HTTP layer does, to
//! register accounts and issue bearer tokens.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{EntityId, Timestamp};

/// A stored user row. `password_hash` is an Argon2id PHC string.
#[derive(Debug, Clone)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Storage port for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Insert a user. A taken username fails with `StoreError::Conflict`.
    async fn insert_user(&self, input: &NewUser) -> StoreResult<User>;
}
