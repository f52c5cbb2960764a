//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    common_words_handler, health_handler, ping_handler, regulation_churn_handler, titles_handler,
    words_by_title_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: allows any origin, matching the open-data posture of the upstream
/// - Tracing: logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .route("/titles", get(titles_handler))
        .route("/words_by_title", get(words_by_title_handler))
        .route("/regulation_churn", get(regulation_churn_handler))
        .route("/common_words_by_title", get(common_words_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
