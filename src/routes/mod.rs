pub mod crossword;
pub mod health;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/crossword", post(crossword::create_crossword))
        .route("/crossword/svg", post(crossword::export_svg))
        .route("/words", get(crossword::list_words))
}
