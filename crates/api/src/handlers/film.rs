//! Handlers for the `/movies` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::film::{FilmDetail, FilmFields, FilmSummary};
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::{deleted_response, path_id, require_path_id};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

/// Query parameters for `GET /movies`.
#[derive(Debug, Default, Deserialize)]
pub struct FilmQuery {
    /// Case-insensitive substring of the title.
    #[serde(alias = "name")]
    pub title: Option<String>,
}

/// GET /api/v1/movies
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<FilmQuery>,
) -> AppResult<Json<DataResponse<Vec<FilmSummary>>>> {
    let films = state.films.get_all(query.title.as_deref()).await?;
    Ok(Json(DataResponse { data: films }))
}

/// GET /api/v1/movies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<DataResponse<FilmDetail>>> {
    let id = require_path_id("Film", &raw_id)?;
    let film = state.films.get_by_id(id).await?;
    Ok(Json(DataResponse { data: film }))
}

/// POST /api/v1/movies
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<FilmFields>,
) -> AppResult<(StatusCode, Json<DataResponse<FilmDetail>>)> {
    let film = state.films.save(None, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: film })))
}

/// PUT /api/v1/movies/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(raw_id): Path<String>,
    Json(input): Json<FilmFields>,
) -> AppResult<Json<DataResponse<FilmDetail>>> {
    let id = require_path_id("Film", &raw_id)?;
    let film = state.films.save(Some(id), input).await?;
    Ok(Json(DataResponse { data: film }))
}

/// DELETE /api/v1/movies/{id}
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(raw_id): Path<String>,
) -> AppResult<(StatusCode, Json<DataResponse<DeletedResponse>>)> {
    let Some(id) = path_id(&raw_id) else {
        return Ok(deleted_response(false));
    };
    let deleted = state.films.delete(id).await?;
    Ok(deleted_response(deleted))
}
