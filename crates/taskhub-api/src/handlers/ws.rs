//! The `/ws` endpoint and its per-connection task.

use std::time::Duration;

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::state::AppState;

/// GET /ws
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_ws_connection(state, socket))
}

/// Runs one upgraded socket to completion.
///
/// Registers the connection, spawns the outbound forwarder (frames plus
/// protocol-level keepalive pings), then runs the inbound loop until
/// the client disconnects or the engine shuts down.
async fn handle_ws_connection(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) = state.realtime.connections.register();
    let conn_id = handle.id;

    info!(conn_id = %conn_id, "Socket upgraded");

    let ping_interval = Duration::from_secs(state.config.realtime.ping_interval_seconds);
    let outbound_task = tokio::spawn(async move {
        let mut ping = tokio::time::interval(ping_interval);
        ping.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                frame = outbound_rx.recv() => {
                    let Some(frame) = frame else { break };
                    if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                _ = ping.tick() => {
                    if ws_tx.send(Message::Ping(Bytes::new())).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    let mut shutdown_rx = state.realtime.shutdown_receiver();
    loop {
        tokio::select! {
            incoming = ws_rx.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        state
                            .realtime
                            .connections
                            .handle_inbound(&conn_id, &text)
                            .await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    // Ping/pong frames are answered by axum automatically.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(conn_id = %conn_id, error = %e, "Socket read failed");
                        break;
                    }
                }
            }
            _ = shutdown_rx.recv() => break,
        }
    }

    outbound_task.abort();
    state.realtime.connections.unregister(&conn_id);

    info!(conn_id = %conn_id, "Socket closed");
}
