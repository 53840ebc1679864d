/**
 * Real-time Socket Handler
 *
 * This module implements the WebSocket endpoint at `GET /ws`. Each client
 * holds exactly one long-lived socket over which it sends
 * `joinBoard`/`leaveBoard` frames and receives board-scoped mutation
 * events plus workspace-wide `activity:new` events.
 *
 * # Connection Lifecycle
 *
 * On upgrade the connection registers with the Room Membership Registry
 * and subscribes to the activity channel. It belongs to zero rooms until
 * it sends a join frame. On any termination, graceful or not, the
 * connection is removed from every room; the server does not remember
 * membership across a disconnect, so a reconnecting client must re-issue
 * its join.
 *
 * # Authentication
 *
 * Browsers cannot set headers on WebSocket upgrades, so the bearer token
 * travels in the `token` query parameter; the `Authorization` header is
 * accepted as well for native clients.
 *
 * # Connection Identity
 *
 * The client may supply its own connection id in the `connection` query
 * parameter and repeat it in the `X-Connection-Id` header of mutation
 * requests, which lets the broadcaster skip echoing events back to their
 * originator. Without it the server assigns an id and the client simply
 * receives its own events too (the reconciliation cache is idempotent).
 */

use std::collections::HashMap;

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use uuid::Uuid;

use crate::backend::auth::verify_token;
use crate::backend::server::state::AppState;
use crate::shared::{BoardEvent, ClientFrame, SharedError};

/// Handle the WebSocket upgrade (GET /ws)
///
/// # Query Parameters
///
/// - `token` - Bearer token (required unless the `Authorization` header is set)
/// - `connection` - Optional client-chosen connection id
///
/// # Errors
///
/// * `401 Unauthorized` - Missing or invalid token
pub async fn handle_socket_upgrade(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: axum::http::HeaderMap,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    let token = params
        .get("token")
        .map(String::as_str)
        .or_else(|| {
            headers
                .get(axum::http::header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
        })
        .ok_or_else(|| {
            tracing::warn!("[Socket] Upgrade without token");
            StatusCode::UNAUTHORIZED
        })?;

    let claims = verify_token(token, &state.jwt_secret).map_err(|e| {
        tracing::warn!("[Socket] Invalid token: {:?}", e);
        StatusCode::UNAUTHORIZED
    })?;

    let connection_id = params
        .get("connection")
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .unwrap_or_else(Uuid::new_v4);

    tracing::info!(
        "[Socket] Connection {} opened for user {}",
        connection_id,
        claims.sub
    );

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id)))
}

/// Drive one live connection until it closes
///
/// The loop multiplexes three sources: inbound client frames, the
/// connection's room event queue, and the workspace activity channel.
/// Send failures terminate only this connection.
async fn handle_socket(socket: WebSocket, state: AppState, connection_id: Uuid) {
    let rooms = state.broadcaster.rooms().clone();
    let mut room_rx = rooms.register(connection_id);
    let mut activity_rx = state.broadcaster.subscribe_activity();
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            inbound = receiver.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        if let Err(e) = handle_client_frame(&rooms, connection_id, text.as_str()) {
                            tracing::warn!("[Socket] Connection {}: {}", connection_id, e);
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::debug!("[Socket] Connection {} closed by peer", connection_id);
                        break;
                    }
                    Some(Ok(_)) => {
                        // Ping/pong and binary frames need no handling here
                    }
                    Some(Err(e)) => {
                        tracing::debug!("[Socket] Connection {} read error: {:?}", connection_id, e);
                        break;
                    }
                }
            }
            event = room_rx.recv() => {
                match event {
                    Some(event) => {
                        if send_event(&mut sender, &event).await.is_err() {
                            break;
                        }
                    }
                    // Registry dropped this connection's queue
                    None => break,
                }
            }
            activity = activity_rx.recv() => {
                match activity {
                    Ok(activity) => {
                        let event = BoardEvent::ActivityNew(activity);
                        if send_event(&mut sender, &event).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            "[Socket] Connection {} lagged, skipped {} activity events",
                            connection_id,
                            skipped
                        );
                        // Continue - the feed catches up on the next event
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    // Unclean disconnects land here too; membership must not outlive the socket
    rooms.remove_connection(connection_id);
    tracing::info!("[Socket] Connection {} removed from all rooms", connection_id);
}

/// Apply one inbound join/leave frame to the registry
///
/// Malformed frames surface as an `EventError` that the caller logs and
/// drops; they never terminate the connection.
fn handle_client_frame(
    rooms: &crate::backend::rooms::RoomRegistry,
    connection_id: Uuid,
    raw: &str,
) -> Result<(), SharedError> {
    let frame = serde_json::from_str::<ClientFrame>(raw)
        .map_err(|e| SharedError::event(format!("ignoring malformed frame: {}", e)))?;
    match frame {
        ClientFrame::JoinBoard(board_id) => {
            rooms.join(connection_id, board_id);
            tracing::info!("[Socket] Connection {} joined board {}", connection_id, board_id);
        }
        ClientFrame::LeaveBoard(board_id) => {
            rooms.leave(connection_id, board_id);
            tracing::info!("[Socket] Connection {} left board {}", connection_id, board_id);
        }
    }
    Ok(())
}

/// Serialize and send one event frame
async fn send_event(
    sender: &mut futures_util::stream::SplitSink<WebSocket, Message>,
    event: &BoardEvent,
) -> Result<(), axum::Error> {
    let frame = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("[Socket] Failed to serialize event: {:?}", e);
            return Ok(());
        }
    };
    sender.send(Message::Text(frame.into())).await
}
