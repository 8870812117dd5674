pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/recommendations",
            get(handlers::handle_recommendations),
        )
        .route(
            "/api/v1/recommendations/score",
            post(handlers::handle_score),
        )
        .with_state(state)
}
