//! Repository for the `characters` and `character_films` tables.

use catalog_core::character::{CharacterFields, NewCharacter};
use catalog_core::criteria::{like_pattern, CharacterCriteria};
use catalog_core::types::EntityId;
use sqlx::PgPool;

use crate::models::character::CharacterRow;
use crate::models::film::FilmRow;
use crate::repositories::film_repo::COLUMNS as FILM_COLUMNS;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, image, name, story, age, weight, created_at, updated_at";

/// Byte-wise name order with id as tie-breaker, so repeated searches return
/// the same sequence regardless of the database locale.
const ORDER_BY: &str = "ORDER BY name COLLATE \"C\", id";

/// Provides CRUD operations for characters plus their film links.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character, returning the created row.
    ///
    /// If `film_ids` is `Some`, the film links are written in the same
    /// transaction.
    pub async fn create(
        pool: &PgPool,
        input: &NewCharacter,
        film_ids: Option<&[EntityId]>,
    ) -> Result<CharacterRow, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO characters (id, image, name, story, age, weight)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let character = sqlx::query_as::<_, CharacterRow>(&query)
            .bind(input.id)
            .bind(&input.image)
            .bind(&input.name)
            .bind(&input.story)
            .bind(input.age)
            .bind(input.weight)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(film_ids) = film_ids {
            Self::set_films_inner(&mut tx, character.id, film_ids).await?;
        }

        tx.commit().await?;
        Ok(character)
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<CharacterRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        sqlx::query_as::<_, CharacterRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find characters matching every supplied criterion.
    ///
    /// `name` and `film_title` are case-insensitive substring matches. The
    /// film title test is an `EXISTS` subquery, so a character linked to
    /// several matching films still appears once.
    pub async fn search(
        pool: &PgPool,
        criteria: &CharacterCriteria,
    ) -> Result<Vec<CharacterRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters c
             WHERE ($1::text IS NULL OR c.name ILIKE $1 ESCAPE '\\')
               AND ($2::int4 IS NULL OR c.age = $2)
               AND ($3::float8 IS NULL OR c.weight = $3)
               AND ($4::text IS NULL OR EXISTS (
                    SELECT 1 FROM character_films cf
                    JOIN films f ON f.id = cf.film_id
                    WHERE cf.character_id = c.id AND f.title ILIKE $4 ESCAPE '\\'))
             {ORDER_BY}"
        );
        sqlx::query_as::<_, CharacterRow>(&query)
            .bind(criteria.name.as_deref().map(like_pattern))
            .bind(criteria.age)
            .bind(criteria.weight)
            .bind(criteria.film_title.as_deref().map(like_pattern))
            .fetch_all(pool)
            .await
    }

    /// Update a character. Only non-`None` fields in `input` are applied.
    ///
    /// If `film_ids` is `Some`, replaces all film links in the same
    /// transaction. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &CharacterFields,
        film_ids: Option<&[EntityId]>,
    ) -> Result<Option<CharacterRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE characters SET
                image = COALESCE($2, image),
                name = COALESCE($3, name),
                story = COALESCE($4, story),
                age = COALESCE($5, age),
                weight = COALESCE($6, weight)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let character = sqlx::query_as::<_, CharacterRow>(&query)
            .bind(id)
            .bind(&input.image)
            .bind(&input.name)
            .bind(&input.story)
            .bind(input.age)
            .bind(input.weight)
            .fetch_optional(&mut *tx)
            .await?;

        if let (Some(character), Some(film_ids)) = (&character, film_ids) {
            Self::set_films_inner(&mut tx, character.id, film_ids).await?;
        }

        tx.commit().await?;
        Ok(character)
    }

    /// Delete a character by ID. Its film links cascade. Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM characters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Film association helpers
    // -----------------------------------------------------------------------

    /// Films linked to a character, ordered by title.
    pub async fn get_films(
        pool: &PgPool,
        character_id: EntityId,
    ) -> Result<Vec<FilmRow>, sqlx::Error> {
        let query = format!(
            "SELECT {FILM_COLUMNS} FROM films
             WHERE id IN (SELECT film_id FROM character_films WHERE character_id = $1)
             ORDER BY title COLLATE \"C\", id"
        );
        sqlx::query_as::<_, FilmRow>(&query)
            .bind(character_id)
            .fetch_all(pool)
            .await
    }

    /// Characters linked to a film, ordered by name.
    pub async fn list_by_film(
        pool: &PgPool,
        film_id: EntityId,
    ) -> Result<Vec<CharacterRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE id IN (SELECT character_id FROM character_films WHERE film_id = $1)
             {ORDER_BY}"
        );
        sqlx::query_as::<_, CharacterRow>(&query)
            .bind(film_id)
            .fetch_all(pool)
            .await
    }

    /// Replace all film links for a character in one transaction.
    ///
    /// Either the whole new set is committed or nothing changes.
    pub async fn set_films(
        pool: &PgPool,
        character_id: EntityId,
        film_ids: &[EntityId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        Self::set_films_inner(&mut tx, character_id, film_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Replace film links within an existing transaction.
    async fn set_films_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        character_id: EntityId,
        film_ids: &[EntityId],
    ) -> Result<(), sqlx::Error> {
        // Lock the character row; concurrent replacements for the same
        // character queue up behind each other.
        sqlx::query("SELECT id FROM characters WHERE id = $1 FOR UPDATE")
            .bind(character_id)
            .fetch_one(&mut **tx)
            .await?;

        // Drop links outside the new set
        sqlx::query("DELETE FROM character_films WHERE character_id = $1 AND film_id <> ALL($2)")
            .bind(character_id)
            .bind(film_ids)
            .execute(&mut **tx)
            .await?;

        // Add the missing ones
        if !film_ids.is_empty() {
            sqlx::query(
                "INSERT INTO character_films (character_id, film_id) \
                 SELECT $1, UNNEST($2::uuid[]) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(character_id)
            .bind(film_ids)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
