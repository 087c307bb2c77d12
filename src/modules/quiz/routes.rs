use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::modules::quiz::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/quiz/generate", post(controller::generate))
        .route("/api/quiz/{id}", get(controller::get_quiz))
        .route("/api/quiz/{id}", delete(controller::delete_quiz))
}
