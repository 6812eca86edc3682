//! Repository for the `genres` table.

use catalog_core::genre::{GenreFields, NewGenre};
use catalog_core::types::EntityId;
use sqlx::PgPool;

use crate::models::genre::GenreRow;

const COLUMNS: &str = "id, name, image, created_at, updated_at";

/// Provides CRUD operations for genres.
pub struct GenreRepo;

impl GenreRepo {
    pub async fn create(pool: &PgPool, input: &NewGenre) -> Result<GenreRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO genres (id, name, image) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GenreRow>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<GenreRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres WHERE id = $1");
        sqlx::query_as::<_, GenreRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<GenreRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres ORDER BY name COLLATE \"C\", id");
        sqlx::query_as::<_, GenreRow>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &GenreFields,
    ) -> Result<Option<GenreRow>, sqlx::Error> {
        let query = format!(
            "UPDATE genres SET
                name = COALESCE($2, name),
                image = COALESCE($3, image)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GenreRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.image)
            .fetch_optional(pool)
            .await
    }

    /// Delete a genre. Films keep existing with `genre_id` set to NULL.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
