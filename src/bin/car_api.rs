use std::net::SocketAddr;

use eshop_catalog_api::{
    config::AppConfig,
    db::{create_car_schema, create_orm_conn, seed_cars},
    routes::create_car_app,
    telemetry::{init_tracing, with_http_layers},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("info,eshop_catalog_api=debug,car_api=debug");

    let config = AppConfig::from_env_with_port("CAR_API_PORT", 3001)?;
    let orm = create_orm_conn(&config.database_url).await?;

    create_car_schema(&orm).await?;
    seed_cars(&orm).await?;

    let app = with_http_layers(create_car_app(orm));

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!("car api listening on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
