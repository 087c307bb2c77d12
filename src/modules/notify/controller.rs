use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::IntoResponse,
};
use tokio::sync::broadcast::error::RecvError;

use crate::services::notify::Notifier;

pub async fn ws_handler(
    State(notifier): State<Notifier>,
    upgrade: WebSocketUpgrade,
) -> impl IntoResponse {
    upgrade.on_upgrade(move |socket| handle_socket(notifier, socket))
}

/// Forwards every broadcast to the connected observer until it disconnects.
/// Observers receive no history and no replay; a lagged receiver simply
/// skips the messages it missed.
async fn handle_socket(notifier: Notifier, mut socket: WebSocket) {
    tracing::info!("notification client connected");
    let mut rx = notifier.subscribe();

    loop {
        tokio::select! {
            message = rx.recv() => {
                match message {
                    Ok(text) => {
                        if socket.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "notification observer lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    // No inbound protocol beyond connect/disconnect.
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    tracing::info!("notification client disconnected");
}
