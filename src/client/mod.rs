/**
 * Client Library
 *
 * Building blocks for a board client: a typed REST client, a persistent
 * WebSocket transport with reconnect, and the reconciliation cache that
 * keeps a local board projection consistent with server events.
 *
 * # Typical Wiring
 *
 * ```ignore
 * let socket = BoardSocket::connect("ws://localhost:3000/ws", token);
 * let api = BoardApiClient::new("http://localhost:3000", token)
 *     .with_connection_id(socket.connection_id());
 *
 * let board = api.get_board(board_id).await?;
 * let cards = api.list_cards(board_id).await?;
 * let mut cache = BoardCache::new();
 * cache.load(board, cards);
 * socket.join_board(board_id)?;
 *
 * let mut moves = socket.on(EventKind::CardMoved);
 * while let Some(event) = moves.recv().await {
 *     cache.apply(&event);
 * }
 * ```
 */

use thiserror::Error;

pub mod api;
pub mod cache;
pub mod socket;

pub use api::BoardApiClient;
pub use cache::BoardCache;
pub use socket::{BoardSocket, Subscription};

/// Errors surfaced by the REST and socket clients
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Socket is disconnected")]
    Disconnected,
}
