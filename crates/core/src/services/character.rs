use std::sync::Arc;

use validator::Validate;

use crate::character::{
    reject_blank, Character, CharacterDetail, CharacterFields, CharacterSummary, FilmRef,
    NewCharacter,
};
use crate::criteria::CharacterCriteria;
use crate::error::{CoreError, CoreResult};
use crate::links::ResourceLinks;
use crate::query::FilteredQueryEngine;
use crate::store::EntityStore;
use crate::sync::AssociationSynchronizer;
use crate::types::EntityId;

/// Orchestrates character reads and writes.
///
/// Built once at start-up from shared collaborators; cheap to share behind
/// an `Arc`.
pub struct CharacterService {
    store: Arc<dyn EntityStore>,
    synchronizer: Arc<AssociationSynchronizer>,
    query: Arc<FilteredQueryEngine>,
    links: ResourceLinks,
}

impl CharacterService {
    pub fn new(
        store: Arc<dyn EntityStore>,
        synchronizer: Arc<AssociationSynchronizer>,
        query: Arc<FilteredQueryEngine>,
        links: ResourceLinks,
    ) -> Self {
        Self {
            store,
            synchronizer,
            query,
            links,
        }
    }

    /// List characters matching `criteria`. No criteria lists everything.
    pub async fn get_all(&self, criteria: CharacterCriteria) -> CoreResult<Vec<CharacterSummary>> {
        self.query.search(criteria).await
    }

    pub async fn get_by_id(&self, id: EntityId) -> CoreResult<CharacterDetail> {
        let character = self
            .store
            .find_character(id)
            .await?
            .ok_or(CoreError::not_found("Character", id))?;
        self.detail(character).await
    }

    /// Create (`id` is `None`) or partially update a character.
    ///
    /// With `film_ids` present, the ids are validated before the character
    /// row is touched, and the row and its new link set are then written in
    /// one atomic store call. An explicit empty list unlinks every film;
    /// `None` leaves links alone.
    pub async fn save(
        &self,
        id: Option<EntityId>,
        fields: CharacterFields,
        film_ids: Option<&[EntityId]>,
    ) -> CoreResult<CharacterDetail> {
        fields.validate()?;

        let resolved = match film_ids {
            Some(ids) => Some(self.synchronizer.resolve(ids).await?.ids()),
            None => None,
        };
        let linked = resolved.as_deref();

        let character = match id {
            None => {
                let input = NewCharacter::from_fields(EntityId::new_v4(), fields)?;
                let character = self.store.insert_character(&input, linked).await?;
                tracing::info!(
                    character_id = %character.id,
                    film_count = ?linked.map(<[EntityId]>::len),
                    "Character created"
                );
                character
            }
            Some(id) => {
                reject_blank("name", fields.name.as_ref())?;
                reject_blank("story", fields.story.as_ref())?;
                let character = self
                    .store
                    .update_character(id, &fields, linked)
                    .await?
                    .ok_or(CoreError::not_found("Character", id))?;
                tracing::info!(
                    character_id = %character.id,
                    film_count = ?linked.map(<[EntityId]>::len),
                    "Character updated"
                );
                character
            }
        };

        self.detail(character).await
    }

    /// Delete a character and its film links. Returns `false` when there was
    /// nothing to delete.
    pub async fn delete(&self, id: EntityId) -> CoreResult<bool> {
        let deleted = self.store.delete_character(id).await?;
        if deleted {
            tracing::info!(character_id = %id, "Character deleted");
        }
        Ok(deleted)
    }

    async fn detail(&self, character: Character) -> CoreResult<CharacterDetail> {
        let films = self
            .store
            .films_for_character(character.id)
            .await?
            .into_iter()
            .map(|film| FilmRef {
                reference: self.links.film(film.id),
                title: film.title,
            })
            .collect();

        Ok(CharacterDetail {
            id: character.id,
            image: character.image,
            name: character.name,
            story: character.story,
            age: character.age,
            weight: character.weight,
            films,
        })
    }
}
