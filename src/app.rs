use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/items", post(handlers::create_item_form))
        .route("/items/:id/complete", post(handlers::complete_task_form))
        .route("/items/:id/log", post(handlers::log_value_form))
        .route("/api/items", get(handlers::list_items).post(handlers::create_item))
        .route("/api/items/:id", get(handlers::get_item))
        .route("/api/items/:id/complete", post(handlers::complete_task))
        .route("/api/items/:id/update", post(handlers::update_value))
        .route("/api/items/:id/history", get(handlers::get_history))
        .route("/api/cards", get(handlers::get_cards))
        .route("/api/export", get(handlers::export))
        .with_state(state)
}
