use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{BasketItem, sum_line_totals, sum_quantities},
    routes::params::empty_string_as_none,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BasketItemViewModel {
    pub id: i32,
    pub catalog_item_id: i32,
    pub product_name: String,
    pub picture_url: String,
    pub unit_price: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BasketViewModel {
    pub id: i32,
    pub buyer_id: String,
    pub items: Vec<BasketItemViewModel>,
}

impl BasketViewModel {
    pub fn total(&self) -> AppResult<i64> {
        sum_line_totals(
            self.items
                .iter()
                .map(|item| (item.unit_price, item.quantity)),
        )
    }

    pub fn items_count(&self) -> AppResult<i32> {
        sum_quantities(self.items.iter().map(|item| item.quantity))
    }
}

/// Add-to-basket form as posted from a catalog page (`Id`, `Price`).
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddToBasketForm {
    #[serde(rename = "Id", default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i32>,
    #[serde(rename = "Price", default, deserialize_with = "empty_string_as_none")]
    #[validate(range(min = 0, max = 1_000_000_000, message = "price is out of range"))]
    pub price: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BasketQuantityUpdate {
    pub id: i32,
    #[validate(range(min = 0, max = 10_000, message = "quantity must be between 0 and 10000"))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateBasketRequest {
    #[validate(nested)]
    pub items: Vec<BasketQuantityUpdate>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TransferBasketRequest {
    #[validate(length(min = 1, message = "user_name must not be empty"))]
    pub user_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BasketCount {
    pub items_count: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BasketDeleted {
    pub basket_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CheckoutSummary {
    pub basket_id: i32,
    pub buyer_id: String,
    pub items: Vec<BasketItem>,
    pub total: i64,
}
