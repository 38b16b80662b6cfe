//! WebSocket observer endpoint
//!
//! Each connection gets its own broadcast subscription and receives
//! every post-operation event as one JSON text frame. Delivery is
//! best-effort: a connection that stops reading falls behind and skips
//! events, and a failed send just closes that connection. Inbound
//! frames are ignored (keep-alive only).

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use tokio::sync::broadcast;

use crate::session::{GameEvent, SessionManager};

/// `GET /ws` — upgrade and stream broadcast events
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(manager): State<Arc<SessionManager>>,
) -> Response {
    let rx = manager.subscribe();
    ws.on_upgrade(move |socket| handle_socket(socket, rx))
}

async fn handle_socket(mut socket: WebSocket, mut rx: broadcast::Receiver<GameEvent>) {
    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => {
                    let payload = match serde_json::to_string(&event) {
                        Ok(payload) => payload,
                        Err(e) => {
                            log::error!("Failed to encode broadcast event: {e}");
                            continue;
                        }
                    };
                    if socket.send(Message::Text(payload.into())).await.is_err() {
                        log::debug!("WebSocket observer disconnected");
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::warn!("WebSocket observer lagged, skipped {skipped} events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            inbound = socket.recv() => match inbound {
                Some(Ok(_)) => {}
                _ => break,
            },
        }
    }
}
