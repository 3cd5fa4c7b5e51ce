use std::collections::HashMap;

use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, Set};

use crate::{
    dto::basket::{BasketItemViewModel, BasketViewModel},
    entity::{baskets::ActiveModel as BasketActive, catalog_items::Model as CatalogItemModel},
    error::AppResult,
    models::{Basket, BasketItem},
    queries::{BasketWithItems, CatalogItemsByIds},
    state::AppState,
    uri::UriComposer,
};

/// Returns the buyer's basket, creating an empty one on first access.
pub async fn get_or_create_basket_for_user(
    state: &AppState,
    buyer_id: &str,
) -> AppResult<BasketViewModel> {
    match BasketWithItems::by_buyer(buyer_id).load(&state.orm).await? {
        Some(basket) => create_view_model_from_basket(state, basket).await,
        None => create_basket_for_user(state, buyer_id).await,
    }
}

/// Total quantity in the buyer's basket. Without a buyer token there is no basket to
/// count and none is created.
pub async fn count_basket_items(state: &AppState, buyer_id: Option<&str>) -> AppResult<i32> {
    match buyer_id {
        Some(buyer_id) => Ok(get_or_create_basket_for_user(state, buyer_id)
            .await?
            .items_count()?),
        None => Ok(0),
    }
}

async fn create_basket_for_user(state: &AppState, buyer_id: &str) -> AppResult<BasketViewModel> {
    let basket = BasketActive {
        id: NotSet,
        buyer_id: Set(buyer_id.to_string()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(basket_id = basket.id, buyer_id, "basket created");

    Ok(BasketViewModel {
        id: basket.id,
        buyer_id: basket.buyer_id,
        items: Vec::new(),
    })
}

async fn create_view_model_from_basket(
    state: &AppState,
    basket: Basket,
) -> AppResult<BasketViewModel> {
    let catalog_items: HashMap<i32, CatalogItemModel> =
        CatalogItemsByIds::new(basket.items.iter().map(|item| item.catalog_item_id))
            .list(&state.orm)
            .await?
            .into_iter()
            .map(|item| (item.id, item))
            .collect();

    let items = compose_basket_items(&basket.items, &catalog_items, &state.uri_composer);

    Ok(BasketViewModel {
        id: basket.id,
        buyer_id: basket.buyer_id,
        items,
    })
}

/// Joins basket lines with their catalog items. Price and quantity always come from the
/// line; a line whose catalog item no longer exists is left out.
pub fn compose_basket_items(
    lines: &[BasketItem],
    catalog_items: &HashMap<i32, CatalogItemModel>,
    uri_composer: &UriComposer,
) -> Vec<BasketItemViewModel> {
    lines
        .iter()
        .filter_map(|line| {
            let Some(catalog_item) = catalog_items.get(&line.catalog_item_id) else {
                tracing::warn!(
                    basket_item_id = line.id,
                    catalog_item_id = line.catalog_item_id,
                    "catalog item missing, skipping basket line"
                );
                return None;
            };
            Some(BasketItemViewModel {
                id: line.id,
                catalog_item_id: line.catalog_item_id,
                product_name: catalog_item.name.clone(),
                picture_url: uri_composer.compose_pic_uri(&catalog_item.picture_uri),
                unit_price: line.unit_price,
                quantity: line.quantity,
            })
        })
        .collect()
}
