use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::modules::audio::controller;
use crate::AppState;

// Uploads are capped at 5 MiB, matching the client contract.
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/audio/upload",
            post(controller::upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/audio/{id}", get(controller::get_audio))
        .route("/api/audio/{id}", delete(controller::delete_audio))
}
