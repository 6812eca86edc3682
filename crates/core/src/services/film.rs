use std::sync::Arc;

use validator::Validate;

use crate::character::reject_blank;
use crate::error::{CoreError, CoreResult};
use crate::film::{CharacterRef, Film, FilmDetail, FilmFields, FilmSummary, GenreRef, NewFilm};
use crate::links::ResourceLinks;
use crate::store::EntityStore;
use crate::types::EntityId;

pub struct FilmService {
    store: Arc<dyn EntityStore>,
    links: ResourceLinks,
}

impl FilmService {
    pub fn new(store: Arc<dyn EntityStore>, links: ResourceLinks) -> Self {
        Self { store, links }
    }

    pub async fn get_all(&self, title: Option<&str>) -> CoreResult<Vec<FilmSummary>> {
        let title = title.map(str::trim).filter(|t| !t.is_empty());
        let films = self.store.list_films(title).await?;
        Ok(films.into_iter().map(FilmSummary::from).collect())
    }

    pub async fn get_by_id(&self, id: EntityId) -> CoreResult<FilmDetail> {
        let film = self
            .store
            .find_film(id)
            .await?
            .ok_or(CoreError::not_found("Film", id))?;
        self.detail(film).await
    }

    /// Create (`id` is `None`) or partially update a film. A supplied
    /// `genre_id` must name a stored genre.
    pub async fn save(&self, id: Option<EntityId>, fields: FilmFields) -> CoreResult<FilmDetail> {
        fields.validate()?;

        if let Some(genre_id) = fields.genre_id {
            if self.store.find_genre(genre_id).await?.is_none() {
                return Err(CoreError::invalid_reference("Genre", [genre_id]));
            }
        }

        let film = match id {
            None => {
                let input = NewFilm::from_fields(EntityId::new_v4(), fields)?;
                let film = self.store.insert_film(&input).await?;
                tracing::info!(film_id = %film.id, "Film created");
                film
            }
            Some(id) => {
                reject_blank("title", fields.title.as_ref())?;
                let film = self
                    .store
                    .update_film(id, &fields)
                    .await?
                    .ok_or(CoreError::not_found("Film", id))?;
                tracing::info!(film_id = %film.id, "Film updated");
                film
            }
        };

        self.detail(film).await
    }

    /// Delete a film. Character links to it disappear with it.
    pub async fn delete(&self, id: EntityId) -> CoreResult<bool> {
        let deleted = self.store.delete_film(id).await?;
        if deleted {
            tracing::info!(film_id = %id, "Film deleted");
        }
        Ok(deleted)
    }

    async fn detail(&self, film: Film) -> CoreResult<FilmDetail> {
        let genre = match film.genre_id {
            Some(genre_id) => self.store.find_genre(genre_id).await?.map(|g| GenreRef {
                reference: self.links.genre(g.id),
                name: g.name,
            }),
            None => None,
        };

        let characters = self
            .store
            .characters_for_film(film.id)
            .await?
            .into_iter()
            .map(|c| CharacterRef {
                reference: self.links.character(c.id),
                name: c.name,
            })
            .collect();

        Ok(FilmDetail {
            id: film.id,
            image: film.image,
            title: film.title,
            release_date: film.release_date,
            rating: film.rating,
            genre,
            characters,
        })
    }
}
