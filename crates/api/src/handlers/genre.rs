//! Handlers for the `/genres` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use catalog_core::genre::{GenreDetail, GenreFields, GenreSummary};

use crate::error::AppResult;
use crate::handlers::{deleted_response, path_id, require_path_id};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

/// GET /api/v1/genres
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<GenreSummary>>>> {
    let genres = state.genres.get_all().await?;
    Ok(Json(DataResponse { data: genres }))
}

/// GET /api/v1/genres/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<DataResponse<GenreDetail>>> {
    let id = require_path_id("Genre", &raw_id)?;
    let genre = state.genres.get_by_id(id).await?;
    Ok(Json(DataResponse { data: genre }))
}

/// POST /api/v1/genres
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<GenreFields>,
) -> AppResult<(StatusCode, Json<DataResponse<GenreDetail>>)> {
    let genre = state.genres.save(None, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: genre })))
}

/// PUT /api/v1/genres/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(raw_id): Path<String>,
    Json(input): Json<GenreFields>,
) -> AppResult<Json<DataResponse<GenreDetail>>> {
    let id = require_path_id("Genre", &raw_id)?;
    let genre = state.genres.save(Some(id), input).await?;
    Ok(Json(DataResponse { data: genre }))
}

/// DELETE /api/v1/genres/{id}
///
/// Films of the genre are kept and lose their genre.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(raw_id): Path<String>,
) -> AppResult<(StatusCode, Json<DataResponse<DeletedResponse>>)> {
    let Some(id) = path_id(&raw_id) else {
        return Ok(deleted_response(false));
    };
    let deleted = state.genres.delete(id).await?;
    Ok(deleted_response(deleted))
}
