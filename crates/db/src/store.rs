//! PostgreSQL implementation of the catalog storage ports.

use async_trait::async_trait;
use catalog_core::accounts::{NewUser, User, UserStore};
use catalog_core::character::{Character, CharacterFields, NewCharacter};
use catalog_core::criteria::CharacterCriteria;
use catalog_core::error::{StoreError, StoreResult};
use catalog_core::film::{Film, FilmFields, NewFilm};
use catalog_core::genre::{Genre, GenreFields, NewGenre};
use catalog_core::store::EntityStore;
use catalog_core::types::EntityId;

use crate::repositories::{CharacterRepo, FilmRepo, GenreRepo, UserRepo};
use crate::DbPool;

/// Storage backed by a shared connection pool. Clones share the pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Classify a failed write that linked `film_ids`. A foreign-key
    /// violation means a film vanished after the caller resolved it; the
    /// transaction has rolled back, so report which ids are now missing.
    async fn film_link_error(
        &self,
        operation: &'static str,
        film_ids: Option<&[EntityId]>,
        err: sqlx::Error,
    ) -> StoreError {
        let Some(film_ids) = film_ids.filter(|_| is_foreign_key_violation(&err)) else {
            return store_error(operation, err);
        };
        let found = match FilmRepo::find_by_ids(&self.pool, film_ids).await {
            Ok(rows) => rows,
            Err(lookup) => return store_error(operation, lookup),
        };
        let missing: Vec<EntityId> = film_ids
            .iter()
            .copied()
            .filter(|id| !found.iter().any(|f| f.id == *id))
            .collect();
        if missing.is_empty() {
            return store_error(operation, err);
        }
        tracing::warn!(operation, missing = missing.len(), "Linked films disappeared mid-write");
        StoreError::MissingReference {
            entity: "Film",
            ids: missing,
        }
    }
}

/// Classify a sqlx error into a [`StoreError`].
///
/// Unique violations (PostgreSQL code 23505) become `Conflict` carrying the
/// constraint name. Everything else is logged and reported as `Backend`.
pub fn store_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            return StoreError::Conflict(constraint.to_string());
        }
    }
    tracing::error!(operation, error = %err, "Database error");
    StoreError::backend(operation, err.to_string())
}

/// PostgreSQL code 23503.
fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503"))
}

/// A film write naming a genre deleted after the caller checked it.
fn genre_link_error(
    operation: &'static str,
    genre_id: Option<EntityId>,
    err: sqlx::Error,
) -> StoreError {
    match genre_id {
        Some(id) if is_foreign_key_violation(&err) => StoreError::MissingReference {
            entity: "Genre",
            ids: vec![id],
        },
        _ => store_error(operation, err),
    }
}

fn into_all<R, T: From<R>>(rows: Vec<R>) -> Vec<T> {
    rows.into_iter().map(T::from).collect()
}

#[async_trait]
impl EntityStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool)
            .await
            .map_err(|e| store_error("ping", e))
    }

    async fn find_character(&self, id: EntityId) -> StoreResult<Option<Character>> {
        CharacterRepo::find_by_id(&self.pool, id)
            .await
            .map(|row| row.map(Character::from))
            .map_err(|e| store_error("find_character", e))
    }

    async fn search_characters(&self, criteria: &CharacterCriteria) -> StoreResult<Vec<Character>> {
        CharacterRepo::search(&self.pool, criteria)
            .await
            .map(into_all)
            .map_err(|e| store_error("search_characters", e))
    }

    async fn insert_character(
        &self,
        input: &NewCharacter,
        film_ids: Option<&[EntityId]>,
    ) -> StoreResult<Character> {
        match CharacterRepo::create(&self.pool, input, film_ids).await {
            Ok(row) => Ok(Character::from(row)),
            Err(e) => Err(self.film_link_error("insert_character", film_ids, e).await),
        }
    }

    async fn update_character(
        &self,
        id: EntityId,
        input: &CharacterFields,
        film_ids: Option<&[EntityId]>,
    ) -> StoreResult<Option<Character>> {
        match CharacterRepo::update(&self.pool, id, input, film_ids).await {
            Ok(row) => Ok(row.map(Character::from)),
            Err(e) => Err(self.film_link_error("update_character", film_ids, e).await),
        }
    }

    async fn delete_character(&self, id: EntityId) -> StoreResult<bool> {
        CharacterRepo::delete(&self.pool, id)
            .await
            .map_err(|e| store_error("delete_character", e))
    }

    async fn films_for_character(&self, character_id: EntityId) -> StoreResult<Vec<Film>> {
        CharacterRepo::get_films(&self.pool, character_id)
            .await
            .map(into_all)
            .map_err(|e| store_error("films_for_character", e))
    }

    async fn replace_character_films(
        &self,
        character_id: EntityId,
        film_ids: &[EntityId],
    ) -> StoreResult<()> {
        match CharacterRepo::set_films(&self.pool, character_id, film_ids).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self
                .film_link_error("replace_character_films", Some(film_ids), e)
                .await),
        }
    }

    async fn find_film(&self, id: EntityId) -> StoreResult<Option<Film>> {
        FilmRepo::find_by_id(&self.pool, id)
            .await
            .map(|row| row.map(Film::from))
            .map_err(|e| store_error("find_film", e))
    }

    async fn find_films_by_ids(&self, ids: &[EntityId]) -> StoreResult<Vec<Film>> {
        FilmRepo::find_by_ids(&self.pool, ids)
            .await
            .map(into_all)
            .map_err(|e| store_error("find_films_by_ids", e))
    }

    async fn list_films(&self, title: Option<&str>) -> StoreResult<Vec<Film>> {
        FilmRepo::list(&self.pool, title)
            .await
            .map(into_all)
            .map_err(|e| store_error("list_films", e))
    }

    async fn insert_film(&self, input: &NewFilm) -> StoreResult<Film> {
        FilmRepo::create(&self.pool, input)
            .await
            .map(Film::from)
            .map_err(|e| genre_link_error("insert_film", input.genre_id, e))
    }

    async fn update_film(&self, id: EntityId, input: &FilmFields) -> StoreResult<Option<Film>> {
        FilmRepo::update(&self.pool, id, input)
            .await
            .map(|row| row.map(Film::from))
            .map_err(|e| genre_link_error("update_film", input.genre_id, e))
    }

    async fn delete_film(&self, id: EntityId) -> StoreResult<bool> {
        FilmRepo::delete(&self.pool, id)
            .await
            .map_err(|e| store_error("delete_film", e))
    }

    async fn characters_for_film(&self, film_id: EntityId) -> StoreResult<Vec<Character>> {
        CharacterRepo::list_by_film(&self.pool, film_id)
            .await
            .map(into_all)
            .map_err(|e| store_error("characters_for_film", e))
    }

    async fn find_genre(&self, id: EntityId) -> StoreResult<Option<Genre>> {
        GenreRepo::find_by_id(&self.pool, id)
            .await
            .map(|row| row.map(Genre::from))
            .map_err(|e| store_error("find_genre", e))
    }

    async fn list_genres(&self) -> StoreResult<Vec<Genre>> {
        GenreRepo::list(&self.pool)
            .await
            .map(into_all)
            .map_err(|e| store_error("list_genres", e))
    }

    async fn insert_genre(&self, input: &NewGenre) -> StoreResult<Genre> {
        GenreRepo::create(&self.pool, input)
            .await
            .map(Genre::from)
            .map_err(|e| store_error("insert_genre", e))
    }

    async fn update_genre(
        &self,
        id: EntityId,
        input: &GenreFields,
    ) -> StoreResult<Option<Genre>> {
        GenreRepo::update(&self.pool, id, input)
            .await
            .map(|row| row.map(Genre::from))
            .map_err(|e| store_error("update_genre", e))
    }

    async fn delete_genre(&self, id: EntityId) -> StoreResult<bool> {
        GenreRepo::delete(&self.pool, id)
            .await
            .map_err(|e| store_error("delete_genre", e))
    }

    async fn films_for_genre(&self, genre_id: EntityId) -> StoreResult<Vec<Film>> {
        FilmRepo::list_by_genre(&self.pool, genre_id)
            .await
            .map(into_all)
            .map_err(|e| store_error("films_for_genre", e))
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        UserRepo::find_by_username(&self.pool, username)
            .await
            .map(|row| row.map(User::from))
            .map_err(|e| store_error("find_user_by_username", e))
    }

    async fn insert_user(&self, input: &NewUser) -> StoreResult<User> {
        UserRepo::create(&self.pool, input)
            .await
            .map(User::from)
            .map_err(|e| store_error("insert_user", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn row_not_found_is_not_a_foreign_key_violation() {
        assert!(!is_foreign_key_violation(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn row_not_found_is_a_backend_error() {
        let err = store_error("find_character", sqlx::Error::RowNotFound);
        assert_matches!(
            err,
            StoreError::Backend {
                operation: "find_character",
                ..
            }
        );
    }
}
