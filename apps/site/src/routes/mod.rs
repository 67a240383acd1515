pub mod health;

use axum::{routing::get, Router};

use crate::careers::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pages (same markup as the static export)
        .route("/", get(handlers::handle_list_page))
        .route("/index.html", get(handlers::handle_list_page))
        .route("/careers/:id", get(handlers::handle_detail_page))
        .route("/careers/:id/", get(handlers::handle_detail_page))
        // JSON view of the records
        .route("/api/v1/careers", get(handlers::handle_list_careers))
        .route("/api/v1/careers/:id", get(handlers::handle_get_career))
        .with_state(state)
}
