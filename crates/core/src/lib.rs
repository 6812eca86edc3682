//! Catalog domain core.
//!
//! Holds the entity types, the error taxonomy, the storage ports and the
//! logic that sits between callers and storage: the character↔film
//! association synchronizer, the filtered character query engine, and the
//! services the HTTP layer talks to. Nothing in here knows about HTTP or
//! PostgreSQL.

pub mod accounts;
pub mod character;
pub mod criteria;
pub mod error;
pub mod film;
pub mod genre;
pub mod links;
pub mod memory;
pub mod query;
pub mod services;
pub mod store;
pub mod sync;
pub mod types;
