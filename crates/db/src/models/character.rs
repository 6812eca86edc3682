use catalog_core::character::Character;
use catalog_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

/// A row from the `characters` table.
#[derive(Debug, Clone, FromRow)]
pub struct CharacterRow {
    pub id: EntityId,
    /// NOT NULL in the database; defaults to `''`.
    pub image: String,
    pub name: String,
    pub story: String,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CharacterRow> for Character {
    fn from(row: CharacterRow) -> Self {
        Self {
            id: row.id,
            image: row.image,
            name: row.name,
            story: row.story,
            age: row.age,
            weight: row.weight,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
