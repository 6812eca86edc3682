//! Genre entity, write inputs, and output projections.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::character::{required_text, FilmRef};
use crate::error::CoreResult;
use crate::types::{EntityId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Genre {
    pub id: EntityId,
    pub name: String,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenreFields {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewGenre {
    pub id: EntityId,
    pub name: String,
    pub image: String,
}

impl NewGenre {
    pub fn from_fields(id: EntityId, fields: GenreFields) -> CoreResult<Self> {
        Ok(Self {
            id,
            name: required_text("name", fields.name)?,
            image: fields.image.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreSummary {
    pub id: EntityId,
    pub name: String,
    pub image: String,
}

impl From<Genre> for GenreSummary {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
            image: genre.image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreDetail {
    pub id: EntityId,
    pub name: String,
    pub image: String,
    pub films: Vec<FilmRef>,
}
