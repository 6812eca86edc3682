//! In-memory storage backend.
//!
//! Implements [`EntityStore`] and [`UserStore`] over plain maps behind a
//! single async `RwLock`. Every write holds the lock for its whole duration,
//! which gives each operation the same all-or-nothing behaviour the
//! PostgreSQL store gets from transactions. Intended for tests and local
//! experiments; nothing is persisted.

use std::collections::{BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::accounts::{NewUser, User, UserStore};
use crate::character::{Character, CharacterFields, NewCharacter};
use crate::criteria::{contains_ignore_case, CharacterCriteria};
use crate::error::{StoreError, StoreResult};
use crate::film::{Film, FilmFields, NewFilm};
use crate::genre::{Genre, GenreFields, NewGenre};
use crate::store::EntityStore;
use crate::sync::distinct_ids;
use crate::types::EntityId;

const MAX_ID: EntityId = EntityId::from_u128(u128::MAX);

#[derive(Debug, Default)]
struct State {
    characters: HashMap<EntityId, Character>,
    films: HashMap<EntityId, Film>,
    genres: HashMap<EntityId, Genre>,
    /// `(character_id, film_id)` pairs.
    links: BTreeSet<(EntityId, EntityId)>,
    users: HashMap<EntityId, User>,
}

impl State {
    fn films_of(&self, character_id: EntityId) -> Vec<&Film> {
        self.links
            .range((character_id, EntityId::nil())..=(character_id, MAX_ID))
            .filter_map(|(_, film_id)| self.films.get(film_id))
            .collect()
    }

    fn check_films(&self, film_ids: &[EntityId]) -> StoreResult<()> {
        let missing: Vec<EntityId> = distinct_ids(film_ids)
            .into_iter()
            .filter(|id| !self.films.contains_key(id))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(StoreError::MissingReference {
                entity: "Film",
                ids: missing,
            })
        }
    }

    /// Caller has run `check_films`.
    fn set_links(&mut self, character_id: EntityId, film_ids: &[EntityId]) {
        let wanted: HashSet<EntityId> = film_ids.iter().copied().collect();
        self.links
            .retain(|(c, f)| *c != character_id || wanted.contains(f));
        for film_id in wanted {
            self.links.insert((character_id, film_id));
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_characters(characters: &mut [Character]) {
    characters.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}

fn sort_films(films: &mut [Film]) {
    films.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn find_character(&self, id: EntityId) -> StoreResult<Option<Character>> {
        Ok(self.state.read().await.characters.get(&id).cloned())
    }

    async fn search_characters(&self, criteria: &CharacterCriteria) -> StoreResult<Vec<Character>> {
        let state = self.state.read().await;
        let mut matched: Vec<Character> = state
            .characters
            .values()
            .filter(|c| {
                let films = state.films_of(c.id);
                criteria.matches(c, films.iter().map(|f| f.title.as_str()))
            })
            .cloned()
            .collect();
        sort_characters(&mut matched);
        Ok(matched)
    }

    async fn insert_character(
        &self,
        input: &NewCharacter,
        film_ids: Option<&[EntityId]>,
    ) -> StoreResult<Character> {
        let mut state = self.state.write().await;
        if state.characters.contains_key(&input.id) {
            return Err(StoreError::Conflict("characters_pkey".into()));
        }
        if let Some(film_ids) = film_ids {
            state.check_films(film_ids)?;
        }
        let now = Utc::now();
        let character = Character {
            id: input.id,
            image: input.image.clone(),
            name: input.name.clone(),
            story: input.story.clone(),
            age: input.age,
            weight: input.weight,
            created_at: now,
            updated_at: now,
        };
        state.characters.insert(character.id, character.clone());
        if let Some(film_ids) = film_ids {
            state.set_links(character.id, film_ids);
        }
        Ok(character)
    }

    async fn update_character(
        &self,
        id: EntityId,
        input: &CharacterFields,
        film_ids: Option<&[EntityId]>,
    ) -> StoreResult<Option<Character>> {
        let mut state = self.state.write().await;
        if !state.characters.contains_key(&id) {
            return Ok(None);
        }
        if let Some(film_ids) = film_ids {
            state.check_films(film_ids)?;
            state.set_links(id, film_ids);
        }
        let Some(character) = state.characters.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(image) = &input.image {
            character.image = image.clone();
        }
        if let Some(name) = &input.name {
            character.name = name.clone();
        }
        if let Some(story) = &input.story {
            character.story = story.clone();
        }
        if input.age.is_some() {
            character.age = input.age;
        }
        if input.weight.is_some() {
            character.weight = input.weight;
        }
        character.updated_at = Utc::now();
        Ok(Some(character.clone()))
    }

    async fn delete_character(&self, id: EntityId) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let removed = state.characters.remove(&id).is_some();
        if removed {
            state.links.retain(|(character_id, _)| *character_id != id);
        }
        Ok(removed)
    }

    async fn films_for_character(&self, character_id: EntityId) -> StoreResult<Vec<Film>> {
        let state = self.state.read().await;
        let mut films: Vec<Film> = state.films_of(character_id).into_iter().cloned().collect();
        sort_films(&mut films);
        Ok(films)
    }

    async fn replace_character_films(
        &self,
        character_id: EntityId,
        film_ids: &[EntityId],
    ) -> StoreResult<()> {
        let mut state = self.state.write().await;
        if !state.characters.contains_key(&character_id) {
            return Err(StoreError::backend(
                "replace_character_films",
                format!("character {character_id} does not exist"),
            ));
        }
        state.check_films(film_ids)?;
        state.set_links(character_id, film_ids);
        Ok(())
    }

    async fn find_film(&self, id: EntityId) -> StoreResult<Option<Film>> {
        Ok(self.state.read().await.films.get(&id).cloned())
    }

    async fn find_films_by_ids(&self, ids: &[EntityId]) -> StoreResult<Vec<Film>> {
        let state = self.state.read().await;
        let unique: BTreeSet<EntityId> = ids.iter().copied().collect();
        Ok(unique
            .iter()
            .filter_map(|id| state.films.get(id).cloned())
            .collect())
    }

    async fn list_films(&self, title: Option<&str>) -> StoreResult<Vec<Film>> {
        let state = self.state.read().await;
        let mut films: Vec<Film> = state
            .films
            .values()
            .filter(|f| title.map_or(true, |t| contains_ignore_case(&f.title, t)))
            .cloned()
            .collect();
        sort_films(&mut films);
        Ok(films)
    }

    async fn insert_film(&self, input: &NewFilm) -> StoreResult<Film> {
        let mut state = self.state.write().await;
        if state.films.contains_key(&input.id) {
            return Err(StoreError::Conflict("films_pkey".into()));
        }
        let now = Utc::now();
        let film = Film {
            id: input.id,
            image: input.image.clone(),
            title: input.title.clone(),
            release_date: input.release_date,
            rating: input.rating,
            genre_id: input.genre_id,
            created_at: now,
            updated_at: now,
        };
        state.films.insert(film.id, film.clone());
        Ok(film)
    }

    async fn update_film(&self, id: EntityId, input: &FilmFields) -> StoreResult<Option<Film>> {
        let mut state = self.state.write().await;
        let Some(film) = state.films.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(image) = &input.image {
            film.image = image.clone();
        }
        if let Some(title) = &input.title {
            film.title = title.clone();
        }
        if input.release_date.is_some() {
            film.release_date = input.release_date;
        }
        if input.rating.is_some() {
            film.rating = input.rating;
        }
        if input.genre_id.is_some() {
            film.genre_id = input.genre_id;
        }
        film.updated_at = Utc::now();
        Ok(Some(film.clone()))
    }

    async fn delete_film(&self, id: EntityId) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let removed = state.films.remove(&id).is_some();
        if removed {
            state.links.retain(|(_, film_id)| *film_id != id);
        }
        Ok(removed)
    }

    async fn characters_for_film(&self, film_id: EntityId) -> StoreResult<Vec<Character>> {
        let state = self.state.read().await;
        let mut characters: Vec<Character> = state
            .links
            .iter()
            .filter(|(_, f)| *f == film_id)
            .filter_map(|(c, _)| state.characters.get(c).cloned())
            .collect();
        sort_characters(&mut characters);
        Ok(characters)
    }

    async fn find_genre(&self, id: EntityId) -> StoreResult<Option<Genre>> {
        Ok(self.state.read().await.genres.get(&id).cloned())
    }

    async fn list_genres(&self) -> StoreResult<Vec<Genre>> {
        let state = self.state.read().await;
        let mut genres: Vec<Genre> = state.genres.values().cloned().collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(genres)
    }

    async fn insert_genre(&self, input: &NewGenre) -> StoreResult<Genre> {
        let mut state = self.state.write().await;
        if state.genres.contains_key(&input.id) {
            return Err(StoreError::Conflict("genres_pkey".into()));
        }
        let now = Utc::now();
        let genre = Genre {
            id: input.id,
            name: input.name.clone(),
            image: input.image.clone(),
            created_at: now,
            updated_at: now,
        };
        state.genres.insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn update_genre(
        &self,
        id: EntityId,
        input: &GenreFields,
    ) -> StoreResult<Option<Genre>> {
        let mut state = self.state.write().await;
        let Some(genre) = state.genres.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            genre.name = name.clone();
        }
        if let Some(image) = &input.image {
            genre.image = image.clone();
        }
        genre.updated_at = Utc::now();
        Ok(Some(genre.clone()))
    }

    async fn delete_genre(&self, id: EntityId) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let removed = state.genres.remove(&id).is_some();
        if removed {
            for film in state.films.values_mut() {
                if film.genre_id == Some(id) {
                    film.genre_id = None;
                }
            }
        }
        Ok(removed)
    }

    async fn films_for_genre(&self, genre_id: EntityId) -> StoreResult<Vec<Film>> {
        let state = self.state.read().await;
        let mut films: Vec<Film> = state
            .films
            .values()
            .filter(|f| f.genre_id == Some(genre_id))
            .cloned()
            .collect();
        sort_films(&mut films);
        Ok(films)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert_user(&self, input: &NewUser) -> StoreResult<User> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.username == input.username) {
            return Err(StoreError::Conflict("uq_users_username".into()));
        }
        let user = User {
            id: input.id,
            username: input.username.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            created_at: Utc::now(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }
}
