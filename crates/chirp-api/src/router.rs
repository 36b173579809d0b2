use axum::{
    Json, Router,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{self, AppState};
use crate::messages;

/// Assemble every route with CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route(
            "/messages",
            get(messages::list_messages).post(messages::submit_message),
        )
        .route(
            "/messages/{message_id}",
            get(messages::get_message)
                .delete(messages::delete_message)
                .patch(messages::update_message),
        )
        .route("/accounts/{account_id}/messages", get(messages::list_account_messages))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
