//! Repository for the `users` table.

use catalog_core::accounts::NewUser;
use sqlx::PgPool;

use crate::models::user::UserRow;

const COLUMNS: &str = "id, username, email, password_hash, created_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert a new user. A taken username violates `uq_users_username`.
    pub async fn create(pool: &PgPool, input: &NewUser) -> Result<UserRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, username, email, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(input.id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }
}
