use std::sync::Arc;

use axum::extract::FromRef;
use mongodb::Database;
use redis::aio::ConnectionManager;

pub mod config;
pub mod modules;
pub mod services;

use services::llm::GenerateText;
use services::notify::Notifier;
use services::pipeline::Pipeline;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub redis: ConnectionManager,
    pub pipeline: Pipeline,
    pub notifier: Notifier,
    pub llm: Arc<dyn GenerateText>,
}

impl FromRef<AppState> for Pipeline {
    fn from_ref(state: &AppState) -> Self {
        state.pipeline.clone()
    }
}

impl FromRef<AppState> for Notifier {
    fn from_ref(state: &AppState) -> Self {
        state.notifier.clone()
    }
}
