use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use validator::Validate;

use crate::{
    dto::catalog::UpdateCatalogItemRequest,
    entity::catalog_items::{ActiveModel, Entity as CatalogItems},
    error::{AppError, AppResult},
    models::CatalogItem,
    state::AppState,
};

/// Updates name and price of one catalog item, keeping its description.
///
/// Cached catalog pages are left as they are and catch up once their idle window lapses.
pub async fn update_catalog_item(
    state: &AppState,
    id: i32,
    payload: UpdateCatalogItemRequest,
) -> AppResult<CatalogItem> {
    payload.validate()?;

    let existing = CatalogItems::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(item) => item,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    active.name = Set(payload.name);
    active.price = Set(payload.price);
    let item = active.update(&state.orm).await?;

    tracing::info!(catalog_item_id = item.id, price = item.price, "catalog item updated");

    Ok(item.into())
}
