use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};

use crate::{
    dto::catalog::{CatalogIndexViewModel, FacetOption, UpdateCatalogItemRequest},
    error::AppResult,
    models::CatalogItem,
    response::{ApiResponse, Meta},
    routes::params::CatalogQuery,
    services::catalog_item_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog_index))
        .route("/brands", get(list_brands))
        .route("/types", get(list_types))
        .route("/items/{id}", put(update_catalog_item))
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    params(
        ("pageId" = Option<u64>, Query, description = "Zero-based page index, default 0"),
        ("pageSize" = Option<u64>, Query, description = "Items per page, default 10, at most 100"),
        ("brandFilterApplied" = Option<i32>, Query, description = "Brand id, empty for all"),
        ("typesFilterApplied" = Option<i32>, Query, description = "Type id, empty for all")
    ),
    responses(
        (status = 200, description = "Catalog page with facets", body = ApiResponse<CatalogIndexViewModel>),
        (status = 400, description = "Bad request"),
    ),
    tag = "Catalog"
)]
pub async fn catalog_index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<ApiResponse<CatalogIndexViewModel>>> {
    let (page_index, page_size) = query.normalize();

    let catalog = state
        .catalog
        .get_catalog_items(
            page_index,
            page_size,
            query.brand_filter_applied,
            query.types_filter_applied,
        )
        .await?;

    let meta = Meta::new(page_index, page_size, catalog.pagination_info.total_items);
    Ok(Json(ApiResponse::success("Catalog", catalog, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/catalog/brands",
    responses(
        (status = 200, description = "Brand filter options", body = ApiResponse<Vec<FacetOption>>)
    ),
    tag = "Catalog"
)]
pub async fn list_brands(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<FacetOption>>>> {
    let brands = state.catalog.get_brands().await?;
    Ok(Json(ApiResponse::success("Brands", brands, None)))
}

#[utoipa::path(
    get,
    path = "/api/catalog/types",
    responses(
        (status = 200, description = "Type filter options", body = ApiResponse<Vec<FacetOption>>)
    ),
    tag = "Catalog"
)]
pub async fn list_types(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<FacetOption>>>> {
    let types = state.catalog.get_types().await?;
    Ok(Json(ApiResponse::success("Types", types, None)))
}

#[utoipa::path(
    put,
    path = "/api/catalog/items/{id}",
    params(
        ("id" = i32, Path, description = "Catalog item id")
    ),
    request_body = UpdateCatalogItemRequest,
    responses(
        (status = 200, description = "Updated catalog item", body = ApiResponse<CatalogItem>),
        (status = 404, description = "Catalog item not found"),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Catalog"
)]
pub async fn update_catalog_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCatalogItemRequest>,
) -> AppResult<Json<ApiResponse<CatalogItem>>> {
    let item = catalog_item_service::update_catalog_item(&state, id, payload).await?;
    Ok(Json(ApiResponse::success(
        "Updated",
        item,
        Some(Meta::empty()),
    )))
}
