use std::sync::Arc;

use validator::Validate;

use crate::character::{reject_blank, FilmRef};
use crate::error::{CoreError, CoreResult};
use crate::genre::{Genre, GenreDetail, GenreFields, GenreSummary, NewGenre};
use crate::links::ResourceLinks;
use crate::store::EntityStore;
use crate::types::EntityId;

pub struct GenreService {
    store: Arc<dyn EntityStore>,
    links: ResourceLinks,
}

impl GenreService {
    pub fn new(store: Arc<dyn EntityStore>, links: ResourceLinks) -> Self {
        Self { store, links }
    }

    pub async fn get_all(&self) -> CoreResult<Vec<GenreSummary>> {
        let genres = self.store.list_genres().await?;
        Ok(genres.into_iter().map(GenreSummary::from).collect())
    }

    pub async fn get_by_id(&self, id: EntityId) -> CoreResult<GenreDetail> {
        let genre = self
            .store
            .find_genre(id)
            .await?
            .ok_or(CoreError::not_found("Genre", id))?;
        self.detail(genre).await
    }

    pub async fn save(&self, id: Option<EntityId>, fields: GenreFields) -> CoreResult<GenreDetail> {
        fields.validate()?;

        let genre = match id {
            None => {
                let input = NewGenre::from_fields(EntityId::new_v4(), fields)?;
                let genre = self.store.insert_genre(&input).await?;
                tracing::info!(genre_id = %genre.id, "Genre created");
                genre
            }
            Some(id) => {
                reject_blank("name", fields.name.as_ref())?;
                let genre = self
                    .store
                    .update_genre(id, &fields)
                    .await?
                    .ok_or(CoreError::not_found("Genre", id))?;
                tracing::info!(genre_id = %genre.id, "Genre updated");
                genre
            }
        };

        self.detail(genre).await
    }

    /// Delete a genre. Its films stay, with no genre.
    pub async fn delete(&self, id: EntityId) -> CoreResult<bool> {
        let deleted = self.store.delete_genre(id).await?;
        if deleted {
            tracing::info!(genre_id = %id, "Genre deleted");
        }
        Ok(deleted)
    }

    async fn detail(&self, genre: Genre) -> CoreResult<GenreDetail> {
        let films = self
            .store
            .films_for_genre(genre.id)
            .await?
            .into_iter()
            .map(|film| FilmRef {
                reference: self.links.film(film.id),
                title: film.title,
            })
            .collect();

        Ok(GenreDetail {
            id: genre.id,
            name: genre.name,
            image: genre.image,
            films,
        })
    }
}
