use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        basket::{
            AddToBasketForm, BasketCount, BasketDeleted, BasketItemViewModel,
            BasketQuantityUpdate, BasketViewModel, CheckoutSummary, TransferBasketRequest,
            UpdateBasketRequest,
        },
        cars::CreateCarRequest,
        catalog::{
            CatalogIndexViewModel, CatalogItemViewModel, FacetOption, PaginationInfo,
            UpdateCatalogItemRequest,
        },
    },
    models::{BasketItem, Car, CatalogItem},
    response::{ApiResponse, Meta},
    routes::{basket, cars, catalog, health, params},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        catalog::catalog_index,
        catalog::list_brands,
        catalog::list_types,
        catalog::update_catalog_item,
        basket::basket_index,
        basket::basket_count,
        basket::add_to_basket,
        basket::update_basket,
        basket::delete_basket,
        basket::checkout,
        basket::transfer_basket,
        cars::list_cars,
        cars::get_car,
        cars::add_car
    ),
    components(
        schemas(
            CatalogItem,
            BasketItem,
            Car,
            CatalogItemViewModel,
            CatalogIndexViewModel,
            FacetOption,
            PaginationInfo,
            UpdateCatalogItemRequest,
            BasketItemViewModel,
            BasketViewModel,
            AddToBasketForm,
            BasketQuantityUpdate,
            UpdateBasketRequest,
            TransferBasketRequest,
            BasketCount,
            BasketDeleted,
            CheckoutSummary,
            CreateCarRequest,
            params::CatalogQuery,
            Meta,
            ApiResponse<CatalogIndexViewModel>,
            ApiResponse<BasketViewModel>,
            ApiResponse<CatalogItem>,
            ApiResponse<CheckoutSummary>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Catalog", description = "Catalog browsing and item updates"),
        (name = "Basket", description = "Cookie-identified shopping basket"),
        (name = "Cars", description = "Car sample API"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
