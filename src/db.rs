use std::time::Duration;

use anyhow::Result;
use sea_orm::{
    ActiveValue::Set, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    PaginatorTrait, Schema, sea_query::TableCreateStatement,
};

use crate::{
    entity::{
        BasketItems, Baskets, Cars, CatalogBrands, CatalogItems, CatalogTypes, cars,
        catalog_brands, catalog_items, catalog_types,
    },
    uri::CATALOG_BASE_URL_PLACEHOLDER,
};

const IN_MEMORY_KEEPALIVE: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Create a SeaORM connection.
///
/// An in-memory SQLite database lives and dies with its connection, so for those URLs the
/// pool is pinned to a single connection that is never reaped.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url.to_string());
    options.sqlx_logging(false);
    if is_in_memory(database_url) {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(IN_MEMORY_KEEPALIVE)
            .max_lifetime(IN_MEMORY_KEEPALIVE);
    }
    let conn = Database::connect(options).await?;
    Ok(conn)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Tables of the catalog and basket aggregates.
pub async fn create_catalog_schema(conn: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(conn.get_database_backend());
    create_tables(
        conn,
        vec![
            schema.create_table_from_entity(CatalogBrands),
            schema.create_table_from_entity(CatalogTypes),
            schema.create_table_from_entity(CatalogItems),
            schema.create_table_from_entity(Baskets),
            schema.create_table_from_entity(BasketItems),
        ],
    )
    .await
}

pub async fn create_car_schema(conn: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(conn.get_database_backend());
    create_tables(conn, vec![schema.create_table_from_entity(Cars)]).await
}

async fn create_tables(
    conn: &DatabaseConnection,
    statements: Vec<TableCreateStatement>,
) -> Result<()> {
    let backend = conn.get_database_backend();
    for mut statement in statements {
        statement.if_not_exists();
        conn.execute(backend.build(&statement)).await?;
    }
    Ok(())
}

/// Seeds brands, types and items unless the catalog already has brands.
pub async fn seed_catalog(conn: &DatabaseConnection) -> Result<()> {
    if CatalogBrands::find().count(conn).await? > 0 {
        tracing::debug!("catalog already seeded");
        return Ok(());
    }

    let brands = [".NET", "Azure", "Other", "SQL Server", "Visual Studio"];
    CatalogBrands::insert_many(brands.iter().zip(1..).map(|(brand, id)| {
        catalog_brands::ActiveModel {
            id: Set(id),
            brand: Set(brand.to_string()),
        }
    }))
    .exec(conn)
    .await?;

    let types = ["Mug", "T-Shirt", "Sheet", "USB Memory Stick"];
    CatalogTypes::insert_many(types.iter().zip(1..).map(|(type_name, id)| {
        catalog_types::ActiveModel {
            id: Set(id),
            type_name: Set(type_name.to_string()),
        }
    }))
    .exec(conn)
    .await?;

    // (name, type, brand, price in cents)
    let items: [(&str, i32, i32, i64); 12] = [
        (".NET Bot Black Sweatshirt", 2, 1, 1950),
        (".NET Black & White Mug", 1, 1, 850),
        ("Prism White T-Shirt", 2, 3, 1200),
        (".NET Foundation Sweatshirt", 2, 1, 1200),
        ("Roslyn Red Sheet", 3, 3, 850),
        (".NET Blue Sweatshirt", 2, 1, 1200),
        ("Roslyn Red T-Shirt", 2, 3, 1200),
        ("Kudu Purple Sweatshirt", 2, 3, 850),
        ("Cup<T> White Mug", 1, 3, 1200),
        (".NET Foundation Sheet", 3, 1, 1200),
        ("Cup<T> Sheet", 3, 1, 850),
        ("Prism White TShirt", 2, 3, 1200),
    ];
    CatalogItems::insert_many(items.iter().zip(1..).map(
        |(&(name, type_id, brand_id, price), id)| catalog_items::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            description: Set(name.to_string()),
            price: Set(price),
            picture_uri: Set(format!(
                "{CATALOG_BASE_URL_PLACEHOLDER}/images/products/{id}.png"
            )),
            catalog_brand_id: Set(brand_id),
            catalog_type_id: Set(type_id),
        },
    ))
    .exec(conn)
    .await?;

    tracing::info!(
        brands = brands.len(),
        types = types.len(),
        items = items.len(),
        "catalog seeded"
    );
    Ok(())
}

pub async fn seed_cars(conn: &DatabaseConnection) -> Result<()> {
    if Cars::find().count(conn).await? > 0 {
        return Ok(());
    }
    Cars::insert(cars::ActiveModel {
        id: Set(1),
        name: Set("Accord".to_string()),
        description: Set("aaaaaa".to_string()),
    })
    .exec(conn)
    .await?;
    tracing::info!("cars seeded");
    Ok(())
}
