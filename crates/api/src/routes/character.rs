use axum::routing::get;
use axum::Router;

use crate::handlers::character;
use crate::state::AppState;

/// Routes mounted at `/characters`.
///
/// ```text
/// GET    /       -> list  (?name=&age=&weight=&movie=)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(character::list).post(character::create))
        .route(
            "/{id}",
            get(character::get_by_id).put(character::update).delete(character::delete),
        )
}
