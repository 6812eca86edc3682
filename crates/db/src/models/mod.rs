//! Row types read from the catalog tables.
//!
//! Each row converts into its `catalog-core` counterpart so nothing above the
//! repository layer sees `sqlx` types.

pub mod character;
pub mod film;
pub mod genre;
pub mod user;
