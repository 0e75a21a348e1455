//! WebSocket endpoint for live asset updates
//!
//! Observers are receive-only: each connection is registered with the
//! `ObserverRegistry` and gets every transition event as a JSON text frame.
//! Inbound text is ignored.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::services::live_updates::ObserverRegistry;
use crate::AppState;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// GET / (upgrade)
pub async fn live_updates_websocket(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.observers))
}

async fn handle_socket(socket: WebSocket, observers: ObserverRegistry) {
    let (mut sender, mut receiver) = socket.split();
    let (observer_id, mut events) = observers.register();

    info!(observer = %observer_id, "Client connected");

    let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(payload) = event else { break };
                if let Err(e) = sender.send(Message::Text(payload.to_string().into())).await {
                    debug!("WebSocket send error: {}", e);
                    break;
                }
            }

            _ = heartbeat.tick() => {
                if let Err(e) = sender.send(Message::Ping(axum::body::Bytes::new())).await {
                    debug!("Heartbeat failed: {}", e);
                    break;
                }
            }

            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) => {
                        info!("WebSocket closed by client");
                        break;
                    }
                    Some(Err(e)) => {
                        error!("WebSocket receive error: {}", e);
                        break;
                    }
                    None => {
                        debug!("WebSocket stream ended");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    observers.unregister(&observer_id);
    info!(observer = %observer_id, "Client disconnected");
}
