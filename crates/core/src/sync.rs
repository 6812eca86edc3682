//! Character↔film association synchronizer.
//!
//! A character's film links are only ever changed here, and only as a whole:
//! the caller supplies the complete target set of film ids. The set is
//! checked against the store in one bulk lookup before anything is written,
//! so a request naming an unknown film changes nothing.
//!
//! Two concurrent synchronizations of the same character are not serialized.
//! Each replacement is atomic on its own, so the association set ends up as
//! whichever writer committed last.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::film::Film;
use crate::store::EntityStore;
use crate::types::EntityId;

/// A validated film set: every requested id resolved, duplicates removed,
/// in first-requested order.
#[derive(Debug, Clone, Default)]
pub struct ResolvedFilms {
    films: Vec<Film>,
}

impl ResolvedFilms {
    pub fn films(&self) -> &[Film] {
        &self.films
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.films.iter().map(|f| f.id).collect()
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }
}

pub struct AssociationSynchronizer {
    store: Arc<dyn EntityStore>,
}

impl AssociationSynchronizer {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Replace the character's linked films with `film_ids`.
    ///
    /// An empty slice unlinks every film. Fails with
    /// [`CoreError::InvalidReference`] and leaves the links untouched when any
    /// id does not name a stored film.
    pub async fn synchronize(
        &self,
        character_id: EntityId,
        film_ids: &[EntityId],
    ) -> CoreResult<ResolvedFilms> {
        let resolved = self.resolve(film_ids).await?;
        self.apply(character_id, &resolved).await?;
        Ok(resolved)
    }

    /// Validation phase: resolve every distinct id in a single lookup.
    pub async fn resolve(&self, film_ids: &[EntityId]) -> CoreResult<ResolvedFilms> {
        let requested = distinct_ids(film_ids);
        if requested.is_empty() {
            return Ok(ResolvedFilms::default());
        }

        let found = self.store.find_films_by_ids(&requested).await?;
        let found_ids: HashSet<EntityId> = found.iter().map(|f| f.id).collect();

        let missing: Vec<EntityId> = requested
            .iter()
            .copied()
            .filter(|id| !found_ids.contains(id))
            .collect();
        if !missing.is_empty() {
            tracing::warn!(
                requested = requested.len(),
                missing = missing.len(),
                "Rejected film set with unknown ids"
            );
            return Err(CoreError::invalid_reference("Film", missing));
        }

        let order: HashMap<EntityId, usize> =
            requested.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        let mut seen = HashSet::with_capacity(found.len());
        let mut films: Vec<Film> = found.into_iter().filter(|f| seen.insert(f.id)).collect();
        films.sort_by_key(|f| order.get(&f.id).copied());
        Ok(ResolvedFilms { films })
    }

    /// Write phase: make `resolved` the character's exact link set.
    pub async fn apply(&self, character_id: EntityId, resolved: &ResolvedFilms) -> CoreResult<()> {
        self.store
            .replace_character_films(character_id, &resolved.ids())
            .await?;
        tracing::info!(
            character_id = %character_id,
            film_count = resolved.len(),
            "Character films synchronized"
        );
        Ok(())
    }
}

/// Drop repeated ids, keeping the first occurrence of each.
pub fn distinct_ids(ids: &[EntityId]) -> Vec<EntityId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
