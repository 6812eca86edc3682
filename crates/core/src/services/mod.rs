//! Entity services called by the HTTP layer.
//!
//! - [`character::CharacterService`] -- search, detail, upsert with film
//!   synchronization, delete.
//! - [`film::FilmService`] -- film CRUD with genre and cast references.
//! - [`genre::GenreService`] -- genre CRUD with film references.

pub mod character;
pub mod film;
pub mod genre;

pub use character::CharacterService;
pub use film::FilmService;
pub use genre::GenreService;
