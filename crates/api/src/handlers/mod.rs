//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the services held in [`crate::state::AppState`] and
//! map errors via [`crate::error::AppError`]. Reads are public; writes take
//! an [`crate::middleware::auth::AuthUser`].

pub mod auth;
pub mod character;
pub mod film;
pub mod genre;

use axum::http::StatusCode;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::types::EntityId;

use crate::response::{DataResponse, DeletedResponse};

/// Parse the `{id}` path segment. A value that is not a UUID cannot name a
/// stored row, so lookups treat it like any other unknown id.
pub(crate) fn path_id(raw: &str) -> Option<EntityId> {
    raw.trim().parse().ok()
}

/// [`path_id`] for lookups and updates: a malformed id is a 404.
pub(crate) fn require_path_id(entity: &'static str, raw: &str) -> Result<EntityId, CoreError> {
    path_id(raw).ok_or_else(|| CoreError::not_found(entity, raw))
}

/// Delete endpoints answer 200 when a row went away and 404 when there was
/// nothing to delete, with `{ "data": { "deleted": bool } }` either way.
pub(crate) fn deleted_response(deleted: bool) -> (StatusCode, Json<DataResponse<DeletedResponse>>) {
    let status = if deleted {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    (
        status,
        Json(DataResponse {
            data: DeletedResponse { deleted },
        }),
    )
}
