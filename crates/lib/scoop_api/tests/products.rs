//! Integration tests: product CRUD through the router and the route table.

mod common;

use axum::http::{Method, StatusCode};
use common::app;
use scoop_api::middleware::permission::{ProtectedRoutes, RouteTableError};
use scoop_api::protected_routes;
use scoop_api::routes::{PRODUCTS, PRODUCTS_ID};
use scoop_core::auth::role::Role;
use serde_json::json;

async fn admin_session(app: &common::TestApp) -> String {
    app.signup_admin("bob").await;
    app.login("bob").await
}

#[tokio::test]
async fn create_get_update_delete() {
    let app = app();
    let cookie = admin_session(&app).await;

    let body = json!({
        "productId": "2190",
        "name": "Chunky Monkey",
        "image_closed": "https://example.com/cm-closed.png",
        "description": "Banana ice cream with fudge chunks",
        "sourcing_values": ["Fairtrade"],
        "ingredients": ["cream", "banana"],
        "dietary_certifications": "Kosher"
    });
    let reply = app.call(Method::POST, "/api/products/", Some(cookie.as_str()), Some(body)).await;
    assert_eq!(reply.status, StatusCode::CREATED, "{:?}", reply.json);

    let reply = app.call(Method::GET, "/api/products/2190", Some(cookie.as_str()), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    let product = &reply.json["product"];
    assert_eq!(product["name"], "Chunky Monkey");
    assert_eq!(product["image_open"], "");
    assert_eq!(product["ingredients"], json!(["cream", "banana"]));

    let patch = json!({"story": "Named by a customer."});
    let reply = app
        .call(Method::PUT, "/api/products/2190", Some(cookie.as_str()), Some(patch))
        .await;
    assert_eq!(reply.status, StatusCode::OK);

    let reply = app.call(Method::GET, "/api/products/2190", Some(cookie.as_str()), None).await;
    assert_eq!(reply.json["product"]["story"], "Named by a customer.");
    assert_eq!(reply.json["product"]["name"], "Chunky Monkey");

    let reply = app.call(Method::DELETE, "/api/products/2190", Some(cookie.as_str()), None).await;
    assert_eq!(reply.status, StatusCode::OK);

    let reply = app.call(Method::GET, "/api/products/2190", Some(cookie.as_str()), None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_update_fields_keep_stored_values() {
    let app = app();
    app.seed("646").await;
    let cookie = admin_session(&app).await;

    let patch = json!({"name": "", "image_open": "", "story": "Retold."});
    let reply = app
        .call(Method::PUT, "/api/products/646", Some(cookie.as_str()), Some(patch))
        .await;
    assert_eq!(reply.status, StatusCode::OK);

    let reply = app.call(Method::GET, "/api/products/646", Some(cookie.as_str()), None).await;
    let product = &reply.json["product"];
    assert_eq!(product["name"], "Vanilla Toffee Bar Crunch");
    assert_eq!(product["image_open"], "https://example.com/open.png");
    assert_eq!(product["story"], "Retold.");
}

#[tokio::test]
async fn duplicate_product_is_conflict() {
    let app = app();
    app.seed("646").await;
    let cookie = admin_session(&app).await;

    let body = json!({"productId": "646", "name": "Again"});
    let reply = app.call(Method::POST, "/api/products/", Some(cookie.as_str()), Some(body)).await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_product_is_bad_request() {
    let app = app();
    let cookie = admin_session(&app).await;

    let body = json!({"productId": "abc", "name": ""});
    let reply = app.call(Method::POST, "/api/products/", Some(cookie.as_str()), Some(body)).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.message().contains("productId"));
    assert!(reply.message().contains("name"));

    let reply = app
        .call(
            Method::PUT,
            "/api/products/646",
            Some(cookie.as_str()),
            Some(json!({"image_open": "not a uri"})),
        )
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app();
    let cookie = admin_session(&app).await;

    let reply = app
        .call(
            Method::POST,
            "/api/products/",
            Some(cookie.as_str()),
            Some(json!(["not", "an", "object"])),
        )
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_of_missing_product_is_not_found() {
    let app = app();
    let cookie = admin_session(&app).await;

    let reply = app
        .call(
            Method::PUT,
            "/api/products/999",
            Some(cookie.as_str()),
            Some(json!({"name": "Ghost"})),
        )
        .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reader_cannot_write() {
    let app = app();
    app.seed("646").await;
    app.signup("alice").await;
    let cookie = app.login("alice").await;

    let body = json!({"productId": "700", "name": "Nope"});
    let reply = app.call(Method::POST, "/api/products/", Some(cookie.as_str()), Some(body)).await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);

    let reply = app
        .call(
            Method::PUT,
            "/api/products/646",
            Some(cookie.as_str()),
            Some(json!({"name": "Nope"})),
        )
        .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
}

#[test]
fn product_routes_require_expected_roles() {
    let routes = protected_routes().expect("route table");
    let table = routes.table();
    assert_eq!(table.len(), 4);
    let role = |m: Method, p: &str| table.get(&m, p).map(|r| r.required);
    assert_eq!(role(Method::GET, PRODUCTS_ID), Some(Role::Read));
    assert_eq!(role(Method::PUT, PRODUCTS_ID), Some(Role::Write));
    assert_eq!(role(Method::POST, PRODUCTS), Some(Role::Write));
    assert_eq!(role(Method::DELETE, PRODUCTS_ID), Some(Role::Delete));
}

#[test]
fn route_without_role_suffix_fails_registration() {
    async fn list() {}
    let result =
        ProtectedRoutes::new().route("PRODUCT_LIST", Method::GET, "/api/products/all", list);
    assert!(matches!(result, Err(RouteTableError::NoRequirement(name)) if name == "PRODUCT_LIST"));
}
