//! Storage port for catalog entities.
//!
//! One trait covers characters, films, genres and the character–film join
//! table so that an association replacement and the lookups it depends on
//! are answered by the same backend. Implementations:
//!
//! - `catalog_db::PgStore` -- PostgreSQL.
//! - [`crate::memory::MemoryStore`] -- in-process maps.
//!
//! Ordering contract for every list-returning method: characters by
//! `(name, id)`, films by `(title, id)`, genres by `(name, id)`, ascending.
//! `find_films_by_ids` is the exception and orders by id alone.

use async_trait::async_trait;

use crate::character::{Character, CharacterFields, NewCharacter};
use crate::criteria::CharacterCriteria;
use crate::error::StoreResult;
use crate::film::{Film, FilmFields, NewFilm};
use crate::genre::{Genre, GenreFields, NewGenre};
use crate::types::EntityId;

#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Cheap reachability probe. In-process stores are always reachable.
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    // -- characters ---------------------------------------------------------

    async fn find_character(&self, id: EntityId) -> StoreResult<Option<Character>>;

    /// Scan characters, joining linked films when `criteria.film_title` is
    /// set. Each matching character appears once. Criteria arrive already
    /// normalized.
    async fn search_characters(&self, criteria: &CharacterCriteria) -> StoreResult<Vec<Character>>;

    /// Insert a character. With `film_ids` present, the character is linked
    /// to exactly those films in the same atomic write. A film that no longer
    /// exists fails with `StoreError::MissingReference` and nothing is stored.
    async fn insert_character(
        &self,
        input: &NewCharacter,
        film_ids: Option<&[EntityId]>,
    ) -> StoreResult<Character>;

    /// Apply the non-`None` fields and, with `film_ids` present, replace the
    /// link set, atomically. Returns `None` if no such character.
    async fn update_character(
        &self,
        id: EntityId,
        input: &CharacterFields,
        film_ids: Option<&[EntityId]>,
    ) -> StoreResult<Option<Character>>;

    /// Delete a character and its association rows. Returns `true` if a row
    /// was removed.
    async fn delete_character(&self, id: EntityId) -> StoreResult<bool>;

    async fn films_for_character(&self, character_id: EntityId) -> StoreResult<Vec<Film>>;

    /// Make `film_ids` the exact association set of the character, atomically.
    /// Links already present are kept, missing ones inserted, the rest
    /// deleted. An id with no stored film fails with
    /// `StoreError::MissingReference` and leaves the links untouched.
    async fn replace_character_films(
        &self,
        character_id: EntityId,
        film_ids: &[EntityId],
    ) -> StoreResult<()>;

    // -- films --------------------------------------------------------------

    async fn find_film(&self, id: EntityId) -> StoreResult<Option<Film>>;

    /// Return exactly the subset of `ids` that exists, at most once each.
    async fn find_films_by_ids(&self, ids: &[EntityId]) -> StoreResult<Vec<Film>>;

    /// List films, optionally restricted to titles containing `title`
    /// (case-insensitive).
    async fn list_films(&self, title: Option<&str>) -> StoreResult<Vec<Film>>;

    async fn insert_film(&self, input: &NewFilm) -> StoreResult<Film>;

    async fn update_film(&self, id: EntityId, input: &FilmFields) -> StoreResult<Option<Film>>;

    async fn delete_film(&self, id: EntityId) -> StoreResult<bool>;

    async fn characters_for_film(&self, film_id: EntityId) -> StoreResult<Vec<Character>>;

    // -- genres -------------------------------------------------------------

    async fn find_genre(&self, id: EntityId) -> StoreResult<Option<Genre>>;

    async fn list_genres(&self) -> StoreResult<Vec<Genre>>;

    async fn insert_genre(&self, input: &NewGenre) -> StoreResult<Genre>;

    async fn update_genre(&self, id: EntityId, input: &GenreFields)
        -> StoreResult<Option<Genre>>;

    /// Delete a genre; its films keep existing with no genre.
    async fn delete_genre(&self, id: EntityId) -> StoreResult<bool>;

    async fn films_for_genre(&self, genre_id: EntityId) -> StoreResult<Vec<Film>>;
}
