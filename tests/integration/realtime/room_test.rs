//! Room membership and delivery integration tests
//!
//! These cover the connection-scale scenarios the inline unit tests do
//! not: many members, overlapping rooms, and disconnect mid-stream.

use uuid::Uuid;

use boardsync::backend::rooms::RoomRegistry;
use boardsync::shared::{BoardEvent, CardMoved};

fn moved() -> BoardEvent {
    BoardEvent::CardMoved(CardMoved {
        card_id: Uuid::new_v4(),
        column_id: Uuid::new_v4(),
    })
}

#[tokio::test]
async fn test_broadcast_reaches_every_member_of_a_large_room() {
    let registry = RoomRegistry::new();
    let board = Uuid::new_v4();

    let mut receivers = Vec::new();
    for _ in 0..50 {
        let conn = Uuid::new_v4();
        receivers.push(registry.register(conn));
        registry.join(conn, board);
    }

    let delivered = registry.broadcast(board, &moved(), None);
    assert_eq!(delivered, 50);
    for rx in &mut receivers {
        assert!(rx.recv().await.is_some());
    }
}

#[tokio::test]
async fn test_connection_in_two_rooms_receives_both_streams() {
    let registry = RoomRegistry::new();
    let board_a = Uuid::new_v4();
    let board_b = Uuid::new_v4();

    let conn = Uuid::new_v4();
    let mut rx = registry.register(conn);
    registry.join(conn, board_a);
    registry.join(conn, board_b);

    registry.broadcast(board_a, &moved(), None);
    registry.broadcast(board_b, &moved(), None);

    assert!(rx.recv().await.is_some());
    assert!(rx.recv().await.is_some());

    let mut rooms = registry.rooms_of(conn);
    rooms.sort();
    let mut expected = vec![board_a, board_b];
    expected.sort();
    assert_eq!(rooms, expected);
}

#[tokio::test]
async fn test_disconnect_mid_stream_does_not_block_others() {
    let registry = RoomRegistry::new();
    let board = Uuid::new_v4();

    let alive = Uuid::new_v4();
    let mut alive_rx = registry.register(alive);
    registry.join(alive, board);

    let gone = Uuid::new_v4();
    let gone_rx = registry.register(gone);
    registry.join(gone, board);
    drop(gone_rx);

    // First broadcast prunes the dead member, second sees a clean room
    let delivered = registry.broadcast(board, &moved(), None);
    assert_eq!(delivered, 1);
    assert_eq!(registry.member_count(board), 1);

    let delivered = registry.broadcast(board, &moved(), None);
    assert_eq!(delivered, 1);

    assert!(alive_rx.recv().await.is_some());
    assert!(alive_rx.recv().await.is_some());
}

#[tokio::test]
async fn test_leave_then_rejoin_resumes_delivery() {
    let registry = RoomRegistry::new();
    let board = Uuid::new_v4();

    let conn = Uuid::new_v4();
    let mut rx = registry.register(conn);
    registry.join(conn, board);

    registry.leave(conn, board);
    registry.broadcast(board, &moved(), None);
    assert!(rx.try_recv().is_err());

    registry.join(conn, board);
    registry.broadcast(board, &moved(), None);
    assert!(rx.recv().await.is_some());
}

#[tokio::test]
async fn test_duplicate_join_delivers_once() {
    let registry = RoomRegistry::new();
    let board = Uuid::new_v4();

    let conn = Uuid::new_v4();
    let mut rx = registry.register(conn);
    registry.join(conn, board);
    registry.join(conn, board);

    let delivered = registry.broadcast(board, &moved(), None);
    assert_eq!(delivered, 1);
    assert!(rx.recv().await.is_some());
    assert!(rx.try_recv().is_err());
}
