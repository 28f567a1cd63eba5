//! API Routes
//!
//! Configures the Axum router with all image cache endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    fetch_image_handler, health_handler, stats_handler, store_image_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /images/:key` - Store raw pixels (`?width=&height=&format=`)
/// - `GET /images/:key` - Fetch raw pixels
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// Keys are single path segments; URLs used as keys must be percent-encoded.
///
/// # Middleware
/// - Body limit: `AppState::max_upload_bytes`
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/images/:key",
            put(store_image_handler).get(fetch_image_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
