use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::modules::summary::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/summary/transcribe-audio", post(controller::transcribe))
        .route("/api/summary/generate-summary", post(controller::generate_summary))
        .route("/api/summary/save-summary", post(controller::save_summary))
        .route("/api/summary/saved-summaries", get(controller::list_summaries))
        .route("/api/summary/{id}", get(controller::get_summary))
        .route("/api/summary/{id}", put(controller::update_summary))
        .route("/api/summary/{id}", delete(controller::delete_summary))
}
