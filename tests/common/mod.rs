#![allow(dead_code)]

use std::time::Duration;

use eshop_catalog_api::{
    db::{create_car_schema, create_catalog_schema, create_orm_conn, seed_cars, seed_catalog},
    entity::{
        catalog_brands::ActiveModel as BrandActive, catalog_items::ActiveModel as ItemActive,
        catalog_types::ActiveModel as TypeActive,
    },
    state::AppState,
    uri::{CATALOG_BASE_URL_PLACEHOLDER, UriComposer},
};
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, Set};

pub const BASE_URL: &str = "http://localhost:3000";

/// Fresh in-memory database with the catalog tables, no rows.
pub async fn empty_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    create_catalog_schema(&orm).await?;
    Ok(AppState::new(
        orm,
        UriComposer::new(BASE_URL),
        Duration::from_secs(30),
    ))
}

pub async fn seeded_state() -> anyhow::Result<AppState> {
    let state = empty_state().await?;
    seed_catalog(&state.orm).await?;
    Ok(state)
}

pub async fn car_db() -> anyhow::Result<DatabaseConnection> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    create_car_schema(&orm).await?;
    seed_cars(&orm).await?;
    Ok(orm)
}

pub async fn insert_brand(orm: &DatabaseConnection, brand: &str) -> anyhow::Result<i32> {
    let model = BrandActive {
        id: NotSet,
        brand: Set(brand.to_string()),
    }
    .insert(orm)
    .await?;
    Ok(model.id)
}

pub async fn insert_type(orm: &DatabaseConnection, type_name: &str) -> anyhow::Result<i32> {
    let model = TypeActive {
        id: NotSet,
        type_name: Set(type_name.to_string()),
    }
    .insert(orm)
    .await?;
    Ok(model.id)
}

pub async fn insert_item(
    orm: &DatabaseConnection,
    name: &str,
    price: i64,
    brand_id: i32,
    type_id: i32,
) -> anyhow::Result<i32> {
    let model = ItemActive {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(format!("{name} description")),
        price: Set(price),
        picture_uri: Set(format!("{CATALOG_BASE_URL_PLACEHOLDER}/images/products/{name}.png")),
        catalog_brand_id: Set(brand_id),
        catalog_type_id: Set(type_id),
    }
    .insert(orm)
    .await?;
    Ok(model.id)
}
