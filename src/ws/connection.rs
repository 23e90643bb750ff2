//! Read/write loop for a single WebSocket listener.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};

use crate::domain::NotificationHub;

/// Runs one listener from registration to disconnect.
///
/// - Registers with the hub, which queues the welcome text first.
/// - Forwards queued messages to the socket as text frames.
/// - Logs inbound frames without replying.
/// - Deregisters once the socket closes or a send fails.
pub async fn run_connection(socket: WebSocket, hub: NotificationHub) {
    let (id, mut outbound) = hub.register().await;
    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        tracing::info!(listener_id = %id, payload = %text.as_str(), "message received");
                    }
                    Some(Ok(Message::Binary(bytes))) => {
                        tracing::info!(listener_id = %id, len = bytes.len(), "binary message received");
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(listener_id = %id, error = %e, "ws receive failed");
                        break;
                    }
                    // Ping/pong are answered by the transport.
                    Some(Ok(_)) => {}
                }
            }
            queued = outbound.recv() => {
                let Some(text) = queued else { break };
                if ws_tx.send(Message::text(text)).await.is_err() {
                    break;
                }
            }
        }
    }

    hub.deregister(id).await;
}
