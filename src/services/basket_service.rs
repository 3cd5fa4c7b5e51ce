use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::{
    config::{MAX_QUANTITY, MAX_UNIT_PRICE},
    dto::basket::CheckoutSummary,
    entity::{
        basket_items::{self, ActiveModel as BasketItemActive, Entity as BasketItems},
        baskets::{self, ActiveModel as BasketActive, Entity as Baskets},
    },
    error::{AppError, AppResult},
    models::{Basket, BasketItem},
    queries::BasketWithItems,
    state::AppState,
};

/// Appends a line to the basket. Lines are never merged: adding the same catalog item
/// twice yields two lines.
pub async fn add_item_to_basket(
    state: &AppState,
    basket_id: i32,
    catalog_item_id: i32,
    price: i64,
    quantity: i32,
) -> AppResult<BasketItem> {
    if !(0..=MAX_UNIT_PRICE).contains(&price) {
        return Err(AppError::BadRequest(format!(
            "price must be between 0 and {MAX_UNIT_PRICE}"
        )));
    }
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(AppError::BadRequest(format!(
            "quantity must be between 1 and {MAX_QUANTITY}"
        )));
    }

    let basket = Baskets::find_by_id(basket_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::BasketNotFound(basket_id))?;

    let item = insert_line(&state.orm, basket.id, catalog_item_id, price, quantity).await?;

    tracing::info!(
        basket_id,
        basket_item_id = item.id,
        catalog_item_id,
        unit_price = price,
        quantity,
        "item added to basket"
    );

    Ok(item)
}

/// Sets quantities of the named lines; lines that end up at zero are removed.
pub async fn set_quantities(
    state: &AppState,
    basket_id: i32,
    quantities: &HashMap<i32, i32>,
) -> AppResult<Basket> {
    if quantities
        .values()
        .any(|quantity| !(0..=MAX_QUANTITY).contains(quantity))
    {
        return Err(AppError::BadRequest(format!(
            "quantity must be between 0 and {MAX_QUANTITY}"
        )));
    }

    let txn = state.orm.begin().await?;

    let mut basket = BasketWithItems::by_id(basket_id)
        .load(&txn)
        .await?
        .ok_or(AppError::BasketNotFound(basket_id))?;

    let touched = basket.set_quantities(quantities);
    let removed = basket.remove_empty_items();

    for item in basket.items.iter().filter(|item| touched.contains(&item.id)) {
        BasketItemActive {
            id: Set(item.id),
            quantity: Set(item.quantity),
            ..Default::default()
        }
        .update(&txn)
        .await?;
    }

    if !removed.is_empty() {
        BasketItems::delete_many()
            .filter(basket_items::Column::Id.is_in(removed.clone()))
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;

    tracing::info!(
        basket_id,
        updated = touched.len(),
        removed = removed.len(),
        "basket quantities set"
    );

    Ok(basket)
}

pub async fn delete_basket(state: &AppState, basket_id: i32) -> AppResult<()> {
    let txn = state.orm.begin().await?;
    if Baskets::find_by_id(basket_id).one(&txn).await?.is_none() {
        return Err(AppError::BasketNotFound(basket_id));
    }
    delete_basket_rows(&txn, basket_id).await?;
    txn.commit().await?;

    tracing::info!(basket_id, "basket deleted");
    Ok(())
}

/// Moves an anonymous buyer's lines into `user_name`'s basket (creating it if needed)
/// and deletes the anonymous basket. Does nothing when there is no anonymous basket.
pub async fn transfer_basket(
    state: &AppState,
    anonymous_id: &str,
    user_name: &str,
) -> AppResult<()> {
    if anonymous_id == user_name {
        return Ok(());
    }

    let txn = state.orm.begin().await?;

    let Some(anonymous) = BasketWithItems::by_buyer(anonymous_id).load(&txn).await? else {
        return Ok(());
    };

    let existing = Baskets::find()
        .filter(baskets::Column::BuyerId.eq(user_name))
        .order_by_asc(baskets::Column::Id)
        .one(&txn)
        .await?;
    let user_basket = match existing {
        Some(basket) => basket,
        None => {
            BasketActive {
                id: NotSet,
                buyer_id: Set(user_name.to_string()),
            }
            .insert(&txn)
            .await?
        }
    };

    for item in &anonymous.items {
        insert_line(
            &txn,
            user_basket.id,
            item.catalog_item_id,
            item.unit_price,
            item.quantity,
        )
        .await?;
    }
    delete_basket_rows(&txn, anonymous.id).await?;

    txn.commit().await?;

    tracing::info!(
        from_basket_id = anonymous.id,
        to_basket_id = user_basket.id,
        lines = anonymous.items.len(),
        "basket transferred"
    );
    Ok(())
}

/// Closes a basket: it must exist and hold at least one line. The basket is removed and
/// a summary of what was bought is returned.
pub async fn checkout(state: &AppState, basket_id: i32) -> AppResult<CheckoutSummary> {
    let txn = state.orm.begin().await?;

    let basket = BasketWithItems::by_id(basket_id)
        .load(&txn)
        .await?
        .ok_or(AppError::BasketNotFound(basket_id))?;
    basket.ensure_can_checkout()?;

    let summary = CheckoutSummary {
        basket_id: basket.id,
        total: basket.total()?,
        buyer_id: basket.buyer_id,
        items: basket.items,
    };

    delete_basket_rows(&txn, basket_id).await?;
    txn.commit().await?;

    tracing::info!(basket_id, total = summary.total, "basket checked out");
    Ok(summary)
}

pub async fn basket_id_for_buyer(state: &AppState, buyer_id: &str) -> AppResult<Option<i32>> {
    let basket = Baskets::find()
        .filter(baskets::Column::BuyerId.eq(buyer_id))
        .order_by_asc(baskets::Column::Id)
        .one(&state.orm)
        .await?;
    Ok(basket.map(|basket| basket.id))
}

async fn insert_line<C: ConnectionTrait>(
    db: &C,
    basket_id: i32,
    catalog_item_id: i32,
    unit_price: i64,
    quantity: i32,
) -> AppResult<BasketItem> {
    let item = BasketItemActive {
        id: NotSet,
        basket_id: Set(basket_id),
        catalog_item_id: Set(catalog_item_id),
        unit_price: Set(unit_price),
        quantity: Set(quantity),
    }
    .insert(db)
    .await?;
    Ok(item.into())
}

async fn delete_basket_rows<C: ConnectionTrait>(db: &C, basket_id: i32) -> AppResult<()> {
    BasketItems::delete_many()
        .filter(basket_items::Column::BasketId.eq(basket_id))
        .exec(db)
        .await?;
    Baskets::delete_by_id(basket_id).exec(db).await?;
    Ok(())
}
