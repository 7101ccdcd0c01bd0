//! API Route Configuration

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{self, AppState};
use super::middleware::{logging_middleware, rate_limit_middleware};

/// In-flight request cap for the whole service
const MAX_CONCURRENT_REQUESTS: usize = 256;

/// Create the API router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let limiter = state.limiter.clone();

    // API v1 routes
    let api_v1 = Router::new()
        // Health & Status
        .route("/health", get(handlers::health_check))
        .route("/stats", get(handlers::get_stats))
        // Scoring & Categorization
        .route("/score", post(handlers::score_signal))
        .route("/categorize", post(handlers::categorize_transaction))
        .route("/assess", post(handlers::assess_transaction))
        .route("/assess/batch", post(handlers::batch_assess));

    // Build full router
    Router::new()
        .nest("/v1", api_v1)
        // Also expose at root for convenience
        .route("/health", get(handlers::health_check))
        .with_state(state)
        // Middleware (order matters - bottom runs first)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::ServiceConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app(rate_limit: u32) -> Router {
        let config = ServiceConfig {
            rate_limit_per_window: rate_limit,
            telemetry_dir: std::env::temp_dir().join("txrisk_route_tests"),
            ..Default::default()
        };
        create_router(Arc::new(AppState::new(config)))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_health() {
        let response = app(10)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_score_round_trip() {
        let response = app(10)
            .oneshot(post_json("/v1/score", r#"{"typeHints":["Swap"],"dex":{"slippagePct":28.4,"poolLiquidityUSD":31000},"token":{"notAllowlisted":true}}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-ratelimit-remaining"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["data"]["risk"], 55);
        assert_eq!(json["data"]["label"], "BAD");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let response = app(10)
            .oneshot(post_json("/v1/categorize", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"]["code"], "API_BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_rate_limit_applies_to_api_only() {
        let router = app(1);
        let first = router.clone().oneshot(post_json("/v1/score", "{}")).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = router.clone().oneshot(post_json("/v1/score", "{}")).await.unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(second.headers().contains_key("x-request-id"));

        let health = router
            .oneshot(Request::builder().uri("/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(health.status(), StatusCode::OK);
    }
}
