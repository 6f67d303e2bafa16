pub mod api_routes;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use api_routes::{chat_handler, health_handler, send_email_handler};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/send-email", post(send_email_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
