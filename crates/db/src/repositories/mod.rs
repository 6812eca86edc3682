//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod character_repo;
pub mod film_repo;
pub mod genre_repo;
pub mod user_repo;

pub use character_repo::CharacterRepo;
pub use film_repo::FilmRepo;
pub use genre_repo::GenreRepo;
pub use user_repo::UserRepo;
