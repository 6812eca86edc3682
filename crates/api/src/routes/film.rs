use axum::routing::get;
use axum::Router;

use crate::handlers::film;
use crate::state::AppState;

/// Routes mounted at `/movies`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(film::list).post(film::create))
        .route(
            "/{id}",
            get(film::get_by_id).put(film::update).delete(film::delete),
        )
}
