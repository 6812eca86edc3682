//! Handlers for the `/characters` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::character::{CharacterDetail, CharacterFields, CharacterSummary};
use catalog_core::criteria::CharacterCriteria;
use catalog_core::error::CoreError;
use catalog_core::types::EntityId;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::{deleted_response, path_id, require_path_id};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

/// Request body for creating or updating a character.
///
/// Every field is optional on update. `films`, when present, is the complete
/// list of film ids the character should be linked to afterwards.
#[derive(Debug, Default, Deserialize)]
pub struct CharacterRequest {
    pub image: Option<String>,
    pub name: Option<String>,
    pub story: Option<String>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    #[serde(alias = "film_ids")]
    pub films: Option<Vec<String>>,
}

impl CharacterRequest {
    fn into_parts(self) -> AppResult<(CharacterFields, Option<Vec<EntityId>>)> {
        let films = self.films.as_deref().map(parse_film_ids).transpose()?;
        let fields = CharacterFields {
            image: self.image,
            name: self.name,
            story: self.story,
            age: self.age,
            weight: self.weight,
        };
        Ok((fields, films))
    }
}

/// Parse film ids from a request body. A value that is not a UUID can never
/// name a stored film, so it is reported the same way as an unknown one.
fn parse_film_ids(raw: &[String]) -> Result<Vec<EntityId>, CoreError> {
    let mut ids = Vec::with_capacity(raw.len());
    let mut malformed = Vec::new();
    for value in raw {
        match value.trim().parse::<EntityId>() {
            Ok(id) => ids.push(id),
            Err(_) => malformed.push(value.clone()),
        }
    }
    if malformed.is_empty() {
        Ok(ids)
    } else {
        Err(CoreError::invalid_reference("Film", malformed))
    }
}

/// Query string for `GET /characters`.
///
/// The film filter may be spelled `movie` or `film_title`; sending both is a
/// 400.
#[derive(Debug, Default, Deserialize)]
pub struct CharacterQuery {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub movie: Option<String>,
    pub film_title: Option<String>,
}

impl CharacterQuery {
    fn into_criteria(self) -> AppResult<CharacterCriteria> {
        if self.movie.is_some() && self.film_title.is_some() {
            return Err(AppError::BadRequest(
                "Use either movie or film_title, not both".into(),
            ));
        }
        Ok(CharacterCriteria {
            name: self.name,
            age: self.age,
            weight: self.weight,
            film_title: self.film_title.or(self.movie),
        })
    }
}

/// GET /api/v1/characters
///
/// Optional filters: `name`, `age`, `weight`, `movie` (or `film_title`).
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CharacterQuery>,
) -> AppResult<Json<DataResponse<Vec<CharacterSummary>>>> {
    let characters = state.characters.get_all(query.into_criteria()?).await?;
    Ok(Json(DataResponse { data: characters }))
}

/// GET /api/v1/characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<DataResponse<CharacterDetail>>> {
    let id = require_path_id("Character", &raw_id)?;
    let character = state.characters.get_by_id(id).await?;
    Ok(Json(DataResponse { data: character }))
}

/// POST /api/v1/characters
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<CharacterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CharacterDetail>>)> {
    let (fields, films) = input.into_parts()?;
    let character = state
        .characters
        .save(None, fields, films.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: character })))
}

/// PUT /api/v1/characters/{id}
///
/// Partial update: omitted fields keep their stored values. Omitting `films`
/// leaves the film links alone; `"films": []` removes them all.
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(raw_id): Path<String>,
    Json(input): Json<CharacterRequest>,
) -> AppResult<Json<DataResponse<CharacterDetail>>> {
    let id = require_path_id("Character", &raw_id)?;
    let (fields, films) = input.into_parts()?;
    let character = state
        .characters
        .save(Some(id), fields, films.as_deref())
        .await?;
    Ok(Json(DataResponse { data: character }))
}

/// DELETE /api/v1/characters/{id}
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(raw_id): Path<String>,
) -> AppResult<(StatusCode, Json<DataResponse<DeletedResponse>>)> {
    let Some(id) = path_id(&raw_id) else {
        return Ok(deleted_response(false));
    };
    let deleted = state.characters.delete(id).await?;
    Ok(deleted_response(deleted))
}
