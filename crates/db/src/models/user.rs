use catalog_core::accounts::User;
use catalog_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

/// A row from the `users` table. Carries the password hash, so it is never
/// serialized.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}
