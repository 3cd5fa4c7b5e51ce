use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use sea_orm::DatabaseConnection;

use crate::{dto::cars::CreateCarRequest, error::AppResult, models::Car, services::car_service};

// Responses are bare JSON, without the ApiResponse envelope.
pub fn router() -> Router<DatabaseConnection> {
    Router::new()
        .route("/", get(list_cars).post(add_car))
        .route("/{id}", get(get_car))
}

#[utoipa::path(
    get,
    path = "/api/car",
    responses(
        (status = 200, description = "All cars", body = Vec<Car>)
    ),
    tag = "Cars"
)]
pub async fn list_cars(State(orm): State<DatabaseConnection>) -> AppResult<Json<Vec<Car>>> {
    Ok(Json(car_service::list_cars(&orm).await?))
}

#[utoipa::path(
    get,
    path = "/api/car/{id}",
    params(
        ("id" = i32, Path, description = "Car id")
    ),
    responses(
        (status = 200, description = "Car", body = Car),
        (status = 404, description = "Car not found"),
    ),
    tag = "Cars"
)]
pub async fn get_car(
    State(orm): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<Json<Car>> {
    Ok(Json(car_service::get_car(&orm, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/car",
    request_body = CreateCarRequest,
    responses(
        (status = 201, description = "Car created", body = Car),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Cars"
)]
pub async fn add_car(
    State(orm): State<DatabaseConnection>,
    Json(payload): Json<CreateCarRequest>,
) -> AppResult<(StatusCode, Json<Car>)> {
    let car = car_service::add_car(&orm, payload).await?;
    Ok((StatusCode::CREATED, Json(car)))
}
