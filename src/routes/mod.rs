use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};
use sea_orm::DatabaseConnection;

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

pub mod basket;
pub mod cars;
pub mod catalog;
pub mod doc;
pub mod health;
pub mod params;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/catalog", catalog::router())
        .nest("/basket", basket::router())
}

/// Full eshop application: health, API, docs and the JSON 404 fallback.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

/// The standalone car sample application.
pub fn create_car_app(orm: DatabaseConnection) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/car", cars::router())
        .fallback(not_found)
        .with_state(orm)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
