//! Filtered character query engine.

use std::collections::HashSet;
use std::sync::Arc;

use crate::character::CharacterSummary;
use crate::criteria::CharacterCriteria;
use crate::error::CoreResult;
use crate::store::EntityStore;

/// Answers character searches with summary projections.
///
/// Criteria are normalized once here, then handed to the store as a single
/// scan. The result holds each matching character exactly once, in the
/// store's `(name, id)` order, even when the character matches the film
/// title criterion through several linked films.
pub struct FilteredQueryEngine {
    store: Arc<dyn EntityStore>,
}

impl FilteredQueryEngine {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn search(&self, criteria: CharacterCriteria) -> CoreResult<Vec<CharacterSummary>> {
        let criteria = criteria.normalized();
        let rows = self.store.search_characters(&criteria).await?;

        let mut seen = HashSet::with_capacity(rows.len());
        let summaries: Vec<CharacterSummary> = rows
            .into_iter()
            .filter(|c| seen.insert(c.id))
            .map(CharacterSummary::from)
            .collect();

        tracing::debug!(
            filtered = !criteria.is_empty(),
            count = summaries.len(),
            "Character search completed"
        );
        Ok(summaries)
    }
}
