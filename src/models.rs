use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::{basket_items, baskets, cars, catalog_items},
    error::{AppError, AppResult},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogItem {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub picture_uri: String,
    pub catalog_brand_id: i32,
    pub catalog_type_id: i32,
}

impl From<catalog_items::Model> for CatalogItem {
    fn from(model: catalog_items::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            picture_uri: model.picture_uri,
            catalog_brand_id: model.catalog_brand_id,
            catalog_type_id: model.catalog_type_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BasketItem {
    pub id: i32,
    pub catalog_item_id: i32,
    /// Price captured when the line was added; never refreshed from the catalog.
    pub unit_price: i64,
    pub quantity: i32,
}

impl From<basket_items::Model> for BasketItem {
    fn from(model: basket_items::Model) -> Self {
        Self {
            id: model.id,
            catalog_item_id: model.catalog_item_id,
            unit_price: model.unit_price,
            quantity: model.quantity,
        }
    }
}

/// Basket aggregate: the buyer's basket together with its owned lines, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Basket {
    pub id: i32,
    pub buyer_id: String,
    pub items: Vec<BasketItem>,
}

impl Basket {
    pub fn from_entities(basket: baskets::Model, items: Vec<basket_items::Model>) -> Self {
        Self {
            id: basket.id,
            buyer_id: basket.buyer_id,
            items: items.into_iter().map(BasketItem::from).collect(),
        }
    }

    pub fn total(&self) -> AppResult<i64> {
        sum_line_totals(self.items.iter().map(|item| (item.unit_price, item.quantity)))
    }

    /// Applies new quantities to the named lines and returns the ids that were touched.
    /// Line ids that are not in the basket are ignored.
    pub fn set_quantities(&mut self, quantities: &HashMap<i32, i32>) -> Vec<i32> {
        let mut touched = Vec::new();
        for item in &mut self.items {
            if let Some(&quantity) = quantities.get(&item.id) {
                item.quantity = quantity;
                touched.push(item.id);
            }
        }
        touched
    }

    /// Drops lines whose quantity reached zero and returns their ids.
    pub fn remove_empty_items(&mut self) -> Vec<i32> {
        let removed = self
            .items
            .iter()
            .filter(|item| item.quantity <= 0)
            .map(|item| item.id)
            .collect();
        self.items.retain(|item| item.quantity > 0);
        removed
    }

    pub fn ensure_can_checkout(&self) -> AppResult<()> {
        if self.items.is_empty() {
            return Err(AppError::EmptyBasketOnCheckout);
        }
        Ok(())
    }
}

/// Σ unit_price × quantity over `(unit_price, quantity)` pairs, failing instead of wrapping.
pub fn sum_line_totals(lines: impl IntoIterator<Item = (i64, i32)>) -> AppResult<i64> {
    lines.into_iter().try_fold(0_i64, |total, (unit_price, quantity)| {
        unit_price
            .checked_mul(i64::from(quantity))
            .and_then(|line| total.checked_add(line))
            .ok_or_else(|| AppError::BadRequest("basket total is out of range".to_string()))
    })
}

pub fn sum_quantities(quantities: impl IntoIterator<Item = i32>) -> AppResult<i32> {
    quantities
        .into_iter()
        .try_fold(0_i32, |count, quantity| count.checked_add(quantity))
        .ok_or_else(|| AppError::BadRequest("basket item count is out of range".to_string()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Car {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl From<cars::Model> for Car {
    fn from(model: cars::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}
