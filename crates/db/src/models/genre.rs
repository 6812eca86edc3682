use catalog_core::genre::Genre;
use catalog_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

/// A row from the `genres` table.
#[derive(Debug, Clone, FromRow)]
pub struct GenreRow {
    pub id: EntityId,
    pub name: String,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<GenreRow> for Genre {
    fn from(row: GenreRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            image: row.image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
