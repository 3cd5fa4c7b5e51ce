use std::net::SocketAddr;

use eshop_catalog_api::{
    config::AppConfig,
    db::{create_catalog_schema, create_orm_conn, seed_catalog},
    routes::create_app,
    state::AppState,
    telemetry::{init_tracing, with_http_layers},
    uri::UriComposer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("info,eshop_catalog_api=debug");

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;

    create_catalog_schema(&orm).await?;
    seed_catalog(&orm).await?;

    let state = AppState::new(
        orm,
        UriComposer::new(&config.catalog_base_url),
        config.catalog_cache_ttl,
    );
    let app = with_http_layers(create_app(state));

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!(
        cache_ttl_secs = config.catalog_cache_ttl.as_secs(),
        "listening on {}",
        addr
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
