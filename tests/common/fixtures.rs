//! Board and card fixtures
//!
//! Builders for the seeded app state most integration tests start from.

use uuid::Uuid;

use boardsync::backend::server::AppState;
use boardsync::shared::{Board, BoardEvent, Card};
use tokio::sync::mpsc::UnboundedReceiver;

/// A board owned by `owner`, inserted into the store
pub async fn seed_board(state: &AppState, owner: Uuid) -> Board {
    let board = Board::new("Sprint".to_string(), None, owner);
    state.store.write().await.insert_board(board.clone())
}

/// A card in the board's first column, inserted into the store
pub async fn seed_card(state: &AppState, board: &Board, title: &str) -> Card {
    let card = Card::new(board.id, board.columns[0].id, title.to_string());
    state.store.write().await.insert_card(card)
}

/// Register a connection and join it to the board's room
///
/// Returns the connection id and the receiver its events arrive on.
pub fn join_room(state: &AppState, board_id: Uuid) -> (Uuid, UnboundedReceiver<BoardEvent>) {
    let connection_id = Uuid::new_v4();
    let rx = state.broadcaster.rooms().register(connection_id);
    state.broadcaster.rooms().join(connection_id, board_id);
    (connection_id, rx)
}
