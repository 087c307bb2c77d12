use axum::{routing::get, Router};

use crate::modules::notify::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/ws", get(controller::ws_handler))
}
