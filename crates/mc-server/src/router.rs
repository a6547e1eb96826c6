//! Axum router construction.
//!
//! Builds the full application router with all route groups, middleware
//! layers and the OpenAPI document.

use axum::middleware;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mission Control API",
        description = "Scientists, planets and the missions that join them",
    ),
    paths(
        routes::health::health_check,
        routes::scientists::list_scientists,
        routes::scientists::create_scientist,
        routes::scientists::get_scientist,
        routes::scientists::update_scientist,
        routes::scientists::delete_scientist,
        routes::planets::list_planets,
        routes::missions::create_mission,
    ),
    components(schemas(
        routes::health::HealthResponse,
        routes::scientists::CreateScientistRequest,
        routes::scientists::UpdateScientistRequest,
        routes::scientists::ScientistResponse,
        routes::scientists::ScientistDetailResponse,
        routes::scientists::ScientistMissionResponse,
        routes::planets::PlanetResponse,
        routes::missions::CreateMissionRequest,
        routes::missions::MissionResponse,
    ))
)]
struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        // Scientists
        .route(
            "/scientists",
            get(routes::scientists::list_scientists).post(routes::scientists::create_scientist),
        )
        .route(
            "/scientists/{id}",
            get(routes::scientists::get_scientist)
                .patch(routes::scientists::update_scientist)
                .delete(routes::scientists::delete_scientist),
        )
        // Planets
        .route("/planets", get(routes::planets::list_planets))
        // Missions
        .route("/missions", post(routes::missions::create_mission))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let db = mc_db::pool::init_memory_pool().unwrap();
        build_router(AppContext::new(db, mc_core::config::Config::default()))
    }

    #[tokio::test]
    async fn openapi_lists_every_route() {
        let response = test_router()
            .oneshot(Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        for path in ["/health", "/scientists", "/scientists/{id}", "/planets", "/missions"] {
            assert!(doc["paths"][path].is_object(), "missing {path}");
        }
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let response = test_router()
            .oneshot(
                Request::get("/health")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn request_id_is_generated() {
        let response = test_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn unknown_method_is_rejected() {
        let response = test_router()
            .oneshot(Request::delete("/planets").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
