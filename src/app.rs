use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/feed", get(handlers::feed_page))
        .route("/entry", post(handlers::submit_entry))
        .route("/api/entries", get(handlers::list_entries).post(handlers::create_entry))
        .route("/api/series", get(handlers::get_series).post(handlers::build_series_from))
        .with_state(state)
}
