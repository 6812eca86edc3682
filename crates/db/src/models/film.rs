use catalog_core::film::Film;
use catalog_core::types::{EntityId, Timestamp};
use chrono::NaiveDate;
use sqlx::FromRow;

/// A row from the `films` table.
#[derive(Debug, Clone, FromRow)]
pub struct FilmRow {
    pub id: EntityId,
    pub image: String,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub rating: Option<f64>,
    /// Set to NULL when the genre is deleted.
    pub genre_id: Option<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<FilmRow> for Film {
    fn from(row: FilmRow) -> Self {
        Self {
            id: row.id,
            image: row.image,
            title: row.title,
            release_date: row.release_date,
            rating: row.rating,
            genre_id: row.genre_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
