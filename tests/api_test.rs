//! Router-level tests using axum's test utilities.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use mc_core::config::Config;
use mc_server::context::AppContext;
use mc_server::router::build_router;
use tower::ServiceExt;

fn create_test_context() -> AppContext {
    let db = mc_db::pool::init_memory_pool().unwrap();
    AppContext::new(db, Config::default())
}

/// Helper to get response body as JSON
async fn body_to_json(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = build_router(create_test_context());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_post_without_content_type_is_400() {
    let app = build_router(create_test_context());

    let response = app
        .oneshot(
            Request::post("/scientists")
                .body(Body::from(r#"{"name": "Vera", "field_of_study": "astronomy"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["errors"][0], "validation errors");
}

#[tokio::test]
async fn test_create_scientist() {
    let app = build_router(create_test_context());

    let response = app
        .oneshot(
            Request::post("/scientists")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"name": "Vera", "field_of_study": "astronomy"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["name"], "Vera");
    assert_eq!(json["id"], 1);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = build_router(create_test_context());

    let response = app
        .oneshot(Request::get("/moons").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
