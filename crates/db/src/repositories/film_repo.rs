//! Repository for the `films` table.

use catalog_core::criteria::like_pattern;
use catalog_core::film::{FilmFields, NewFilm};
use catalog_core::types::EntityId;
use sqlx::PgPool;

use crate::models::film::FilmRow;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, image, title, release_date, rating, genre_id, created_at, updated_at";

/// Provides CRUD operations for films.
pub struct FilmRepo;

impl FilmRepo {
    /// Insert a new film, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewFilm) -> Result<FilmRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO films (id, image, title, release_date, rating, genre_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FilmRow>(&query)
            .bind(input.id)
            .bind(&input.image)
            .bind(&input.title)
            .bind(input.release_date)
            .bind(input.rating)
            .bind(input.genre_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<FilmRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE id = $1");
        sqlx::query_as::<_, FilmRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every film whose id is in `ids`. Unknown ids are simply absent
    /// from the result.
    pub async fn find_by_ids(pool: &PgPool, ids: &[EntityId]) -> Result<Vec<FilmRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, FilmRow>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List films ordered by title, optionally narrowed to titles containing
    /// `title` (case-insensitive).
    pub async fn list(pool: &PgPool, title: Option<&str>) -> Result<Vec<FilmRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM films
             WHERE ($1::text IS NULL OR title ILIKE $1 ESCAPE '\\')
             ORDER BY title COLLATE \"C\", id"
        );
        sqlx::query_as::<_, FilmRow>(&query)
            .bind(title.map(like_pattern))
            .fetch_all(pool)
            .await
    }

    /// Films belonging to a genre, ordered by title.
    pub async fn list_by_genre(
        pool: &PgPool,
        genre_id: EntityId,
    ) -> Result<Vec<FilmRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM films WHERE genre_id = $1 ORDER BY title COLLATE \"C\", id"
        );
        sqlx::query_as::<_, FilmRow>(&query)
            .bind(genre_id)
            .fetch_all(pool)
            .await
    }

    /// Update a film. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &FilmFields,
    ) -> Result<Option<FilmRow>, sqlx::Error> {
        let query = format!(
            "UPDATE films SET
                image = COALESCE($2, image),
                title = COALESCE($3, title),
                release_date = COALESCE($4, release_date),
                rating = COALESCE($5, rating),
                genre_id = COALESCE($6, genre_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FilmRow>(&query)
            .bind(id)
            .bind(&input.image)
            .bind(&input.title)
            .bind(input.release_date)
            .bind(input.rating)
            .bind(input.genre_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a film by ID. Character links cascade. Returns `true` if a row
    /// was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM films WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
