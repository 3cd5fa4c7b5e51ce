use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::{
    config::MAX_PAGE_SIZE,
    dto::catalog::{
        CatalogIndexViewModel, CatalogItemViewModel, FacetOption, PaginationInfo, facet_options,
    },
    entity::{CatalogBrands, CatalogTypes, catalog_items::Model as CatalogItemModel},
    error::{AppError, AppResult},
    queries::{CatalogFilter, CatalogFilterPaginated},
    uri::UriComposer,
};

/// Read side of the catalog as consumed by the listing page.
#[async_trait]
pub trait CatalogViewModelService: Send + Sync {
    /// One page of catalog items matching the optional brand/type filters, with facets
    /// and pagination metadata. `page_index` is zero-based.
    async fn get_catalog_items(
        &self,
        page_index: u64,
        items_page: u64,
        brand_id: Option<i32>,
        type_id: Option<i32>,
    ) -> AppResult<CatalogIndexViewModel>;

    async fn get_brands(&self) -> AppResult<Vec<FacetOption>>;

    async fn get_types(&self) -> AppResult<Vec<FacetOption>>;
}

#[derive(Debug, Clone)]
pub struct CatalogService {
    orm: DatabaseConnection,
    uri_composer: UriComposer,
}

impl CatalogService {
    pub fn new(orm: DatabaseConnection, uri_composer: UriComposer) -> Self {
        Self { orm, uri_composer }
    }

    fn item_view_model(&self, item: CatalogItemModel) -> CatalogItemViewModel {
        CatalogItemViewModel {
            id: item.id,
            picture_uri: self.uri_composer.compose_pic_uri(&item.picture_uri),
            name: item.name,
            price: item.price,
        }
    }
}

#[async_trait]
impl CatalogViewModelService for CatalogService {
    async fn get_catalog_items(
        &self,
        page_index: u64,
        items_page: u64,
        brand_id: Option<i32>,
        type_id: Option<i32>,
    ) -> AppResult<CatalogIndexViewModel> {
        tracing::info!(page_index, items_page, ?brand_id, ?type_id, "get_catalog_items called");
        if items_page == 0 {
            return Err(AppError::BadRequest(
                "page size must be greater than 0".to_string(),
            ));
        }

        let items_page = items_page.min(MAX_PAGE_SIZE);
        // SQLite binds offsets as i64.
        let skip = page_index
            .checked_mul(items_page)
            .filter(|skip| i64::try_from(*skip).is_ok())
            .ok_or_else(|| AppError::BadRequest(format!("page {page_index} is out of range")))?;

        let filter = CatalogFilter::new(brand_id, type_id);
        let paginated = CatalogFilterPaginated::new(skip, items_page, filter);

        let items_on_page = paginated.list(&self.orm).await?;
        let total_items = filter.count(&self.orm).await?;

        let catalog_items: Vec<CatalogItemViewModel> = items_on_page
            .into_iter()
            .map(|item| self.item_view_model(item))
            .collect();
        let pagination_info =
            PaginationInfo::new(page_index, catalog_items.len(), total_items, items_page);

        Ok(CatalogIndexViewModel {
            catalog_items,
            brands: self.get_brands().await?,
            types: self.get_types().await?,
            brand_filter_applied: brand_id,
            types_filter_applied: type_id,
            pagination_info,
        })
    }

    async fn get_brands(&self) -> AppResult<Vec<FacetOption>> {
        tracing::info!("get_brands called");
        let brands = CatalogBrands::find().all(&self.orm).await?;
        Ok(facet_options(
            brands.into_iter().map(|brand| (brand.id, brand.brand)),
        ))
    }

    async fn get_types(&self) -> AppResult<Vec<FacetOption>> {
        tracing::info!("get_types called");
        let types = CatalogTypes::find().all(&self.orm).await?;
        Ok(facet_options(
            types.into_iter().map(|kind| (kind.id, kind.type_name)),
        ))
    }
}
