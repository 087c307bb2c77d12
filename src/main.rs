use std::env;
use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tracing::info;

use virtunotes::services::llm::LlmClient;
use virtunotes::services::notify::Notifier;
use virtunotes::services::pipeline::Pipeline;
use virtunotes::services::speech::SpeechClient;
use virtunotes::services::storage::StorageClient;
use virtunotes::services::summarize::Summarizer;
use virtunotes::{config, modules, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let db = config::database::connect().await;
    let redis = config::redis::connect().await;

    let storage = StorageClient::from_env();
    let speech = SpeechClient::from_env();
    let llm = Arc::new(LlmClient::from_env().context("text-generation backend not configured")?);
    let notifier = Notifier::new();

    let pipeline = Pipeline::new(
        db.clone(),
        storage,
        speech,
        Summarizer::new(llm.clone()),
        notifier.clone(),
    );

    let state = AppState {
        db,
        redis,
        pipeline,
        notifier,
        llm,
    };

    let app = Router::new()
        .route("/", get(|| async { "Server is running." }))
        .merge(modules::audio::routes::routes())
        .merge(modules::summary::routes::routes())
        .merge(modules::quiz::routes::routes())
        .merge(modules::user::routes::routes())
        .merge(modules::notify::routes::routes())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let addr = format!("0.0.0.0:{port}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "server running");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
