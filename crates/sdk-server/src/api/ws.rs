//! WebSocket connection lifecycle: upgrade, register, forward broadcasts, unregister.

use axum::extract::{
    ws::{Message, WebSocket, WebSocketUpgrade},
    State,
};
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, info, trace};

use crate::api::AppState;
use crate::relay::{ConnectionSink, Outbound};

/// Requests without the upgrade handshake are rejected by the extractor.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> axum::response::Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Register the connection, push the current frequency state, then pump frames
/// until the client closes, the transport fails, or the server shuts down.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (sink, mut outbound) = ConnectionSink::channel(state.config.ws_queue_capacity);
    let conn_id = state.registry.next_id();
    if !state.registry.register(conn_id, sink) {
        debug!(conn_id, "server shutting down, closing new connection");
        let _ = ws_tx.send(Message::Close(None)).await;
        return;
    }
    info!(conn_id, "websocket client connected");

    // New clients start in sync without waiting for the next radio event.
    state.translator.push_frequency_state();

    let mut writer = tokio::spawn(async move {
        while let Some(out) = outbound.recv().await {
            match out {
                Outbound::Text(text) => {
                    if ws_tx.send(Message::Text(text)).await.is_err() {
                        return;
                    }
                }
                Outbound::Close => break,
            }
        }
        let _ = ws_tx.send(Message::Close(None)).await;
    });

    loop {
        tokio::select! {
            _ = &mut writer => {
                debug!(conn_id, "writer stopped");
                break;
            }
            frame = ws_rx.next() => match frame {
                // The protocol layer queues the pong echo and flushes it on the next read.
                Some(Ok(Message::Ping(payload))) => {
                    trace!(conn_id, len = payload.len(), "ping");
                }
                Some(Ok(Message::Close(_))) => {
                    info!(conn_id, "client sent close frame");
                    break;
                }
                Some(Ok(_)) => trace!(conn_id, "ignoring client frame"),
                Some(Err(e)) => {
                    debug!(conn_id, error = %e, "websocket read failed");
                    break;
                }
                None => break,
            }
        }
    }

    state.registry.unregister(conn_id);
    writer.abort();
    info!(conn_id, "websocket client disconnected");
}
