use std::sync::Arc;

use catalog_core::accounts::UserStore;
use catalog_core::links::ResourceLinks;
use catalog_core::query::FilteredQueryEngine;
use catalog_core::services::{CharacterService, FilmService, GenreService};
use catalog_core::store::EntityStore;
use catalog_core::sync::AssociationSynchronizer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (read by the auth extractor and handlers).
    pub config: Arc<ServerConfig>,
    /// Catalog storage, shared by every service.
    pub store: Arc<dyn EntityStore>,
    /// User accounts for register/login.
    pub users: Arc<dyn UserStore>,
    pub characters: Arc<CharacterService>,
    pub films: Arc<FilmService>,
    pub genres: Arc<GenreService>,
}

impl AppState {
    /// Wire the services once over the given stores.
    pub fn new(
        config: ServerConfig,
        store: Arc<dyn EntityStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        let links = ResourceLinks::new(&config.base_url);
        let synchronizer = Arc::new(AssociationSynchronizer::new(Arc::clone(&store)));
        let query = Arc::new(FilteredQueryEngine::new(Arc::clone(&store)));

        let characters = Arc::new(CharacterService::new(
            Arc::clone(&store),
            synchronizer,
            query,
            links.clone(),
        ));
        let films = Arc::new(FilmService::new(Arc::clone(&store), links.clone()));
        let genres = Arc::new(GenreService::new(Arc::clone(&store), links));

        Self {
            config: Arc::new(config),
            store,
            users,
            characters,
            films,
            genres,
        }
    }
}
