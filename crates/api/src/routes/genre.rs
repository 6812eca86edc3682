use axum::routing::get;
use axum::Router;

use crate::handlers::genre;
use crate::state::AppState;

/// Routes mounted at `/genres`.
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
        .route("/", get(genre::list).post(genre::create))
        .route(
            "/{id}",
            get(genre::get_by_id).put(genre::update).delete(genre::delete),
        )
}
