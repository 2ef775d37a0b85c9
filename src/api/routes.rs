use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Session views
        .route("/session", get(handlers::get_session))
        .route("/session/analytics", get(handlers::get_analytics))
        // Filter vocabulary
        .route("/filters", get(handlers::get_filters))
        // Session events
        .route("/session/genres/toggle", post(handlers::toggle_genre))
        .route("/session/years/toggle", post(handlers::toggle_year))
        .route("/session/preference", post(handlers::set_preference))
        .route("/session/submit", post(handlers::submit_preference))
        .route("/session/clear", post(handlers::clear_session))
        .route(
            "/session/analytics/toggle",
            post(handlers::toggle_analytics),
        )
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
