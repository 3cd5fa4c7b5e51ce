use async_trait::async_trait;

use crate::{
    cache::SlidingCache,
    dto::catalog::{CatalogIndexViewModel, FacetOption},
    error::AppResult,
    services::catalog_service::CatalogViewModelService,
};

pub const BRANDS_CACHE_KEY: &str = "brands";
pub const TYPES_CACHE_KEY: &str = "types";

pub fn catalog_items_cache_key(
    page_index: u64,
    items_page: u64,
    brand_id: Option<i32>,
    type_id: Option<i32>,
) -> String {
    let brand = brand_id.map(|id| id.to_string()).unwrap_or_default();
    let kind = type_id.map(|id| id.to_string()).unwrap_or_default();
    format!("items-{page_index}-{items_page}-{brand}-{kind}")
}

/// Read-through caching in front of another catalog service.
///
/// Results are kept under a sliding expiration. Catalog writes do not evict anything, so
/// a page may be served stale for up to one idle window after an update.
#[derive(Debug, Clone)]
pub struct CachedCatalogService<S> {
    cache: SlidingCache,
    inner: S,
}

impl<S: CatalogViewModelService> CachedCatalogService<S> {
    pub fn new(cache: SlidingCache, inner: S) -> Self {
        Self { cache, inner }
    }

    pub fn cache(&self) -> &SlidingCache {
        &self.cache
    }
}

#[async_trait]
impl<S: CatalogViewModelService> CatalogViewModelService for CachedCatalogService<S> {
    async fn get_catalog_items(
        &self,
        page_index: u64,
        items_page: u64,
        brand_id: Option<i32>,
        type_id: Option<i32>,
    ) -> AppResult<CatalogIndexViewModel> {
        let key = catalog_items_cache_key(page_index, items_page, brand_id, type_id);
        self.cache
            .get_or_create(&key, || {
                self.inner
                    .get_catalog_items(page_index, items_page, brand_id, type_id)
            })
            .await
    }

    async fn get_brands(&self) -> AppResult<Vec<FacetOption>> {
        self.cache
            .get_or_create(BRANDS_CACHE_KEY, || self.inner.get_brands())
            .await
    }

    async fn get_types(&self) -> AppResult<Vec<FacetOption>> {
        self.cache
            .get_or_create(TYPES_CACHE_KEY, || self.inner.get_types())
            .await
    }
}
