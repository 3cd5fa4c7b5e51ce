use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;

use crate::{
    cache::SlidingCache,
    services::{
        cached_catalog_service::CachedCatalogService,
        catalog_service::{CatalogService, CatalogViewModelService},
    },
    uri::UriComposer,
};

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub catalog: Arc<dyn CatalogViewModelService>,
    pub uri_composer: UriComposer,
}

impl AppState {
    /// Wires the catalog read path: the store-backed service behind a sliding cache that
    /// lives as long as this state.
    pub fn new(orm: DatabaseConnection, uri_composer: UriComposer, cache_ttl: Duration) -> Self {
        let catalog = CachedCatalogService::new(
            SlidingCache::new(cache_ttl),
            CatalogService::new(orm.clone(), uri_composer.clone()),
        );
        Self {
            orm,
            catalog: Arc::new(catalog),
            uri_composer,
        }
    }
}
