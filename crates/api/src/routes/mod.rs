pub mod auth;
pub mod character;
pub mod film;
pub mod genre;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                   register (public)
/// /auth/login                      login (public)
///
/// /characters                      search, create
/// /characters/{id}                 get, update, delete
///
/// /movies                          list, create
/// /movies/{id}                     get, update, delete
///
/// /genres                          list, create
/// /genres/{id}                     get, update, delete
/// ```
///
/// GET routes are public; every other method needs a bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/characters", character::router())
        .nest("/movies", film::router())
        .nest("/genres", genre::router())
}
