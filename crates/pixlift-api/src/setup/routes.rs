//! Route configuration and setup.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::api_doc;
use crate::handlers;
use crate::state::AppState;
use pixlift_core::Config;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router<()> {
    // The original service fronted a single-page client with a permissive
    // CORS policy; keep that contract.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    tracing::info!(
        http_concurrency_limit = config.http_concurrency_limit,
        max_file_size_bytes = config.max_file_size_bytes,
        "HTTP limit layers enabled"
    );

    Router::new()
        .route("/api/enhance", post(handlers::enhance::enhance_image))
        .route(
            "/api/openapi.json",
            get(|| async { Json(api_doc::openapi_spec()) }),
        )
        .route("/health", get(handlers::health::liveness_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        // Wildcard artifact route; static routes above take precedence.
        .route("/{filename}", get(handlers::artifact::get_artifact))
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(ConcurrencyLimitLayer::new(config.http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(config.max_file_size_bytes))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
