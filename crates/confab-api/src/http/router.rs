//! Axum router configuration with middleware.
//!
//! All routes are under `/api/chat`.
//! Middleware: CORS, tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let chat_routes = Router::new()
        .route("/send", post(handlers::chat::send_message))
        .route("/summarize", post(handlers::chat::summarize_text))
        .route(
            "/history/{session_id}",
            get(handlers::history::get_history).delete(handlers::history::clear_history),
        )
        .route("/recent", get(handlers::history::get_recent))
        .route("/health", get(health_check));

    Router::new()
        .nest("/api/chat", chat_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /api/chat/health - Simple health check endpoint (no state touched).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "service": "confab-api",
    }))
}
