mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use eshop_catalog_api::routes::create_app;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::seeded_state;

async fn app() -> anyhow::Result<Router> {
    Ok(create_app(seeded_state().await?))
}

async fn send(app: &Router, request: Request<Body>) -> anyhow::Result<(StatusCode, header::HeaderMap, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, headers, body))
}

fn get(uri: &str, cookie: Option<&str>) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    Ok(builder.body(Body::empty())?)
}

fn post_form(uri: &str, cookie: &str, form: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))?)
}

fn post_json(uri: &str, cookie: &str, payload: Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))?)
}

fn set_cookie(headers: &header::HeaderMap) -> Option<String> {
    headers
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[tokio::test]
async fn first_basket_visit_issues_a_long_lived_cookie() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, headers, body) = send(&app, get("/api/basket", None)?).await?;

    assert_eq!(status, StatusCode::OK);
    let cookie = set_cookie(&headers).expect("basket cookie");
    assert!(cookie.starts_with("eShop="));
    assert!(cookie.contains("Max-Age=315360000"));
    assert!(cookie.contains("HttpOnly"));
    assert!(body["data"]["items"].as_array().expect("items").is_empty());

    let token = cookie
        .trim_start_matches("eShop=")
        .split(';')
        .next()
        .expect("token");
    assert_eq!(body["data"]["buyer_id"], token);
    Ok(())
}

#[tokio::test]
async fn basket_count_without_cookie_is_zero_and_sets_nothing() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, headers, body) = send(&app, get("/api/basket/count", None)?).await?;

    assert_eq!(status, StatusCode::OK);
    assert!(set_cookie(&headers).is_none());
    assert_eq!(body["data"]["items_count"], 0);
    Ok(())
}

#[tokio::test]
async fn add_form_redirects_to_basket_and_stores_the_line() -> anyhow::Result<()> {
    let app = app().await?;
    let cookie = "eShop=buyer-1";

    let (status, headers, _) =
        send(&app, post_form("/api/basket", cookie, "Id=1&Price=1950")?).await?;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/api/basket");

    let (_, _, body) = send(&app, get("/api/basket", Some(cookie))?).await?;
    let items = body["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["catalog_item_id"], 1);
    assert_eq!(items[0]["unit_price"], 1950);
    assert_eq!(items[0]["quantity"], 1);

    let (_, _, count) = send(&app, get("/api/basket/count", Some(cookie))?).await?;
    assert_eq!(count["data"]["items_count"], 1);
    Ok(())
}

#[tokio::test]
async fn add_form_without_id_goes_back_to_catalog() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, headers, _) =
        send(&app, post_form("/api/basket", "eShop=buyer-2", "Id=&Price=")?).await?;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/api/catalog");
    Ok(())
}

#[tokio::test]
async fn invalid_quantity_update_returns_the_unchanged_basket() -> anyhow::Result<()> {
    let app = app().await?;
    let cookie = "eShop=buyer-3";
    send(&app, post_form("/api/basket", cookie, "Id=2&Price=850")?).await?;
    let (_, _, before) = send(&app, get("/api/basket", Some(cookie))?).await?;
    let line_id = before["data"]["items"][0]["id"].clone();

    let (status, _, body) = send(
        &app,
        post_json(
            "/api/basket/update",
            cookie,
            json!({ "items": [{ "id": line_id, "quantity": -1 }] }),
        )?,
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"], before["data"]);

    let (status, _, body) = send(
        &app,
        post_json(
            "/api/basket/update",
            cookie,
            json!({ "items": [{ "id": line_id, "quantity": 3 }] }),
        )?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["quantity"], 3);
    Ok(())
}

#[tokio::test]
async fn transfer_rewrites_the_basket_cookie() -> anyhow::Result<()> {
    let app = app().await?;
    let cookie = "eShop=anon-9";
    send(&app, post_form("/api/basket", cookie, "Id=4&Price=1200")?).await?;

    let (status, headers, body) = send(
        &app,
        post_json("/api/basket/transfer", cookie, json!({ "user_name": "carol" }))?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert!(set_cookie(&headers).expect("cookie").starts_with("eShop=carol"));
    assert_eq!(body["data"]["buyer_id"], "carol");
    assert_eq!(body["data"]["items"].as_array().expect("items").len(), 1);
    Ok(())
}

#[tokio::test]
async fn deleting_a_basket_that_was_never_created_is_not_found() -> anyhow::Result<()> {
    let app = app().await?;
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/basket")
        .header(header::COOKIE, "eShop=ghost")
        .body(Body::empty())?;
    let (status, _, _) = send(&app, request).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn catalog_treats_empty_filters_as_all() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, _, body) = send(
        &app,
        get(
            "/api/catalog?pageId=0&brandFilterApplied=&typesFilterApplied=",
            None,
        )?,
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["catalog_items"].as_array().expect("items").len(), 10);
    assert_eq!(body["data"]["brand_filter_applied"], Value::Null);
    assert_eq!(body["meta"]["total"], 12);

    let (_, _, page) = send(&app, get("/api/catalog?pageId=1&brandFilterApplied=3", None)?).await?;
    assert_eq!(page["data"]["pagination_info"]["total_items"], 6);
    assert!(page["data"]["catalog_items"].as_array().expect("items").is_empty());
    Ok(())
}

#[tokio::test]
async fn unknown_paths_fall_back_to_json_not_found() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, _, body) = send(&app, get("/api/nowhere", None)?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["path"], "/api/nowhere");
    Ok(())
}

#[tokio::test]
async fn huge_page_numbers_are_a_bad_request() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, _, _) = send(&app, get("/api/catalog?pageId=1000000000000000000", None)?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = send(&app, get("/api/catalog?pageSize=100000", None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["per_page"], 100);
    assert_eq!(body["data"]["pagination_info"]["total_pages"], 1);
    Ok(())
}

#[tokio::test]
async fn add_form_rejects_missing_and_out_of_range_prices() -> anyhow::Result<()> {
    let app = app().await?;
    let cookie = "eShop=buyer-4";

    let (status, _, _) = send(&app, post_form("/api/basket", cookie, "Id=1")?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(
        &app,
        post_form("/api/basket", cookie, "Id=1&Price=9223372036854775807")?,
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, _, count) = send(&app, get("/api/basket/count", Some(cookie))?).await?;
    assert_eq!(count["data"]["items_count"], 0);
    Ok(())
}

#[tokio::test]
async fn quantity_above_the_limit_is_rejected() -> anyhow::Result<()> {
    let app = app().await?;
    let cookie = "eShop=buyer-5";
    send(&app, post_form("/api/basket", cookie, "Id=2&Price=850")?).await?;
    let (_, _, before) = send(&app, get("/api/basket", Some(cookie))?).await?;
    let line_id = before["data"]["items"][0]["id"].clone();

    let (status, _, body) = send(
        &app,
        post_json(
            "/api/basket/update",
            cookie,
            json!({ "items": [{ "id": line_id, "quantity": 2147483647 }] }),
        )?,
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"]["items"][0]["quantity"], 1);
    Ok(())
}
