//! WebSocket upgrade handler for the hint channel.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use itqan_realtime::message::types::OutboundMessage;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameter for WebSocket authentication.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// JWT access token.
    pub token: String,
}

/// GET /ws?token={jwt} — WebSocket upgrade.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, ApiError> {
    // Authenticate before upgrade.
    let claims = state.jwt_decoder.decode_access_token(&query.token)?;

    Ok(ws.on_upgrade(move |socket| handle_ws_connection(state, claims, socket)))
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(
    state: AppState,
    claims: itqan_auth::jwt::claims::Claims,
    socket: WebSocket,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (handle, mut outbound_rx) = state
        .realtime
        .connections
        .register(claims.user_id(), claims.role);

    let conn_id = handle.id;
    let user_id = claims.user_id();

    info!(
        conn_id = %conn_id,
        user_id = %user_id,
        "WebSocket connection established"
    );

    // Outbound forwarder: connection buffer → socket, plus keepalive pings.
    let ping_interval = state.realtime.ping_interval();
    let outbound_task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(ping_interval);
        loop {
            tokio::select! {
                msg = outbound_rx.recv() => {
                    let Some(msg) = msg else { break };
                    if ws_tx.send(Message::Text(msg.to_json().into())).await.is_err() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let ping = OutboundMessage::Ping {
                        timestamp: chrono::Utc::now().timestamp_millis(),
                    };
                    if ws_tx.send(Message::Text(ping.to_json().into())).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    // Process inbound messages until the peer goes away.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                state.realtime.connections.handle_inbound(&conn_id, &text);
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.realtime.connections.unregister(&conn_id);

    info!(
        conn_id = %conn_id,
        user_id = %user_id,
        "WebSocket connection closed"
    );
}
