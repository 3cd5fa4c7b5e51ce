use std::collections::HashMap;

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::{BASKET_COOKIE_DAYS, BASKET_COOKIE_NAME},
    dto::basket::{
        AddToBasketForm, BasketCount, BasketDeleted, BasketViewModel, CheckoutSummary,
        TransferBasketRequest, UpdateBasketRequest,
    },
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    services::{basket_service, basket_view_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(basket_index).post(add_to_basket).delete(delete_basket),
        )
        .route("/count", get(basket_count))
        .route("/update", post(update_basket))
        .route("/checkout", post(checkout))
        .route("/transfer", post(transfer_basket))
}

fn basket_cookie(value: String) -> Cookie<'static> {
    Cookie::build((BASKET_COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::days(BASKET_COOKIE_DAYS))
        .build()
}

/// Buyer token from the basket cookie, minting and setting a fresh one when absent.
fn buyer_id_from_cookie(jar: CookieJar) -> (CookieJar, String) {
    if let Some(buyer_id) = jar
        .get(BASKET_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
    {
        return (jar, buyer_id);
    }

    let buyer_id = Uuid::new_v4().to_string();
    tracing::debug!(buyer_id = %buyer_id, "issuing basket cookie");
    (jar.add(basket_cookie(buyer_id.clone())), buyer_id)
}

#[utoipa::path(
    get,
    path = "/api/basket",
    responses(
        (status = 200, description = "Current basket, created on first access", body = ApiResponse<BasketViewModel>)
    ),
    tag = "Basket"
)]
pub async fn basket_index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<ApiResponse<BasketViewModel>>)> {
    let (jar, buyer_id) = buyer_id_from_cookie(jar);
    let basket = basket_view_service::get_or_create_basket_for_user(&state, &buyer_id).await?;
    Ok((jar, Json(ApiResponse::success("Basket", basket, None))))
}

#[utoipa::path(
    get,
    path = "/api/basket/count",
    responses(
        (status = 200, description = "Number of items in the current basket", body = ApiResponse<BasketCount>)
    ),
    tag = "Basket"
)]
pub async fn basket_count(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<Json<ApiResponse<BasketCount>>> {
    let buyer_id = jar
        .get(BASKET_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string());
    let items_count = basket_view_service::count_basket_items(&state, buyer_id.as_deref()).await?;
    Ok(Json(ApiResponse::success(
        "Basket count",
        BasketCount { items_count },
        None,
    )))
}

#[utoipa::path(
    post,
    path = "/api/basket",
    request_body(content = AddToBasketForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Item added, redirect to basket; without Id, redirect to catalog"),
        (status = 400, description = "Price missing"),
        (status = 422, description = "Price out of range"),
    ),
    tag = "Basket"
)]
pub async fn add_to_basket(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AddToBasketForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let Some(catalog_item_id) = form.id else {
        return Ok((jar, Redirect::to("/api/catalog")));
    };
    form.validate()?;
    let price = form
        .price
        .ok_or_else(|| AppError::BadRequest("Price is required".to_string()))?;

    let (jar, buyer_id) = buyer_id_from_cookie(jar);
    let basket = basket_view_service::get_or_create_basket_for_user(&state, &buyer_id).await?;
    basket_service::add_item_to_basket(&state, basket.id, catalog_item_id, price, 1).await?;

    Ok((jar, Redirect::to("/api/basket")))
}

#[utoipa::path(
    post,
    path = "/api/basket/update",
    request_body = UpdateBasketRequest,
    responses(
        (status = 200, description = "Quantities applied", body = ApiResponse<BasketViewModel>),
        (status = 422, description = "Validation failed, basket returned unchanged", body = ApiResponse<BasketViewModel>),
    ),
    tag = "Basket"
)]
pub async fn update_basket(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<UpdateBasketRequest>,
) -> AppResult<Response> {
    let (jar, buyer_id) = buyer_id_from_cookie(jar);
    let basket = basket_view_service::get_or_create_basket_for_user(&state, &buyer_id).await?;

    if let Err(errors) = payload.validate() {
        tracing::debug!(basket_id = basket.id, error = %errors, "basket update rejected");
        let body = ApiResponse {
            message: format!("Validation failed: {errors}"),
            data: Some(basket),
            meta: None,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, jar, Json(body)).into_response());
    }

    let quantities: HashMap<i32, i32> = payload
        .items
        .iter()
        .map(|item| (item.id, item.quantity))
        .collect();
    basket_service::set_quantities(&state, basket.id, &quantities).await?;

    let basket = basket_view_service::get_or_create_basket_for_user(&state, &buyer_id).await?;
    Ok((jar, Json(ApiResponse::success("Basket updated", basket, None))).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/basket",
    responses(
        (status = 200, description = "Basket deleted", body = ApiResponse<BasketDeleted>),
        (status = 404, description = "No basket for this buyer"),
    ),
    tag = "Basket"
)]
pub async fn delete_basket(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<Json<ApiResponse<BasketDeleted>>> {
    let buyer_id = jar
        .get(BASKET_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .ok_or(AppError::NotFound)?;
    let basket_id = basket_service::basket_id_for_buyer(&state, &buyer_id)
        .await?
        .ok_or(AppError::NotFound)?;

    basket_service::delete_basket(&state, basket_id).await?;

    Ok(Json(ApiResponse::success(
        "Basket deleted",
        BasketDeleted { basket_id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/basket/checkout",
    responses(
        (status = 200, description = "Basket checked out", body = ApiResponse<CheckoutSummary>),
        (status = 400, description = "Basket is empty"),
    ),
    tag = "Basket"
)]
pub async fn checkout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<ApiResponse<CheckoutSummary>>)> {
    let (jar, buyer_id) = buyer_id_from_cookie(jar);
    let basket = basket_view_service::get_or_create_basket_for_user(&state, &buyer_id).await?;
    let summary = basket_service::checkout(&state, basket.id).await?;
    Ok((jar, Json(ApiResponse::success("Checked out", summary, None))))
}

#[utoipa::path(
    post,
    path = "/api/basket/transfer",
    request_body = TransferBasketRequest,
    responses(
        (status = 200, description = "Basket now owned by the user", body = ApiResponse<BasketViewModel>),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Basket"
)]
pub async fn transfer_basket(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<TransferBasketRequest>,
) -> AppResult<(CookieJar, Json<ApiResponse<BasketViewModel>>)> {
    payload.validate()?;
    let (jar, anonymous_id) = buyer_id_from_cookie(jar);

    basket_service::transfer_basket(&state, &anonymous_id, &payload.user_name).await?;
    let basket =
        basket_view_service::get_or_create_basket_for_user(&state, &payload.user_name).await?;

    let jar = jar.add(basket_cookie(payload.user_name));
    Ok((jar, Json(ApiResponse::success("Basket transferred", basket, None))))
}
