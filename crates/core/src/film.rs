//! Film entity, write inputs, and output projections.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::character::required_text;
use crate::error::CoreResult;
use crate::types::{EntityId, Timestamp};

/// A stored film row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Film {
    pub id: EntityId,
    pub image: String,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub rating: Option<f64>,
    pub genre_id: Option<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Writable film fields. Same create/update rules as characters.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FilmFields {
    pub image: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Rated on a 0 to 5 scale.
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
    pub genre_id: Option<EntityId>,
}

#[derive(Debug, Clone)]
pub struct NewFilm {
    pub id: EntityId,
    pub image: String,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub rating: Option<f64>,
    pub genre_id: Option<EntityId>,
}

impl NewFilm {
    pub fn from_fields(id: EntityId, fields: FilmFields) -> CoreResult<Self> {
        Ok(Self {
            id,
            image: fields.image.unwrap_or_default(),
            title: required_text("title", fields.title)?,
            release_date: fields.release_date,
            rating: fields.rating,
            genre_id: fields.genre_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilmSummary {
    pub id: EntityId,
    pub title: String,
    pub image: String,
    pub release_date: Option<NaiveDate>,
}

impl From<Film> for FilmSummary {
    fn from(film: Film) -> Self {
        Self {
            id: film.id,
            title: film.title,
            image: film.image,
            release_date: film.release_date,
        }
    }
}

/// The genre a film belongs to, as a followable reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreRef {
    pub name: String,
    pub reference: String,
}

/// A character appearing in a film, as a followable reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterRef {
    pub name: String,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilmDetail {
    pub id: EntityId,
    pub image: String,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub rating: Option<f64>,
    pub genre: Option<GenreRef>,
    pub characters: Vec<CharacterRef>,
}
