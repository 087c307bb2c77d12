use axum::{routing::get, Router};

use crate::modules::user::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/user/{id}/saved-summaries",
        get(controller::saved_summaries),
    )
}
