/**
 * Room Membership Registry
 *
 * Tracks which live connections are subscribed to which board id and fans
 * broadcast events out to room members. This is the only shared mutable
 * structure touched by every connection's lifecycle, so all access goes
 * through one mutex held only for short map operations.
 *
 * # Ordering
 *
 * Each member owns an ordered, unbounded mpsc queue and every broadcast to
 * a room enqueues under the same mutex guard, so broadcasts to one room
 * are delivered to each member in publish order. No ordering is guaranteed
 * across different rooms.
 *
 * # Disconnects
 *
 * Disconnects are not always graceful: a member whose receiver has been
 * dropped is pruned from every room the next time a broadcast reaches it,
 * and the socket task additionally calls `remove_connection` on shutdown.
 */
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::shared::BoardEvent;

/// Identifier of a live connection
pub type ConnectionId = Uuid;

/// Sending half of a connection's event queue
pub type EventSender = mpsc::UnboundedSender<BoardEvent>;

#[derive(Default)]
struct RegistryInner {
    /// board id -> member connections
    rooms: HashMap<Uuid, HashMap<ConnectionId, EventSender>>,
    /// connection id -> (event queue, rooms it belongs to)
    connections: HashMap<ConnectionId, (EventSender, HashSet<Uuid>)>,
}

/// Registry of live connections and their board room memberships
///
/// Cheap to clone; clones share the same underlying membership state.
/// One instance is owned by the server process, with its lifecycle tied to
/// process start and stop.
#[derive(Clone, Default)]
pub struct RoomRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a live connection and its event queue
    ///
    /// Returns the receiving half the connection's writer task drains.
    /// A connection belongs to zero rooms until it joins one.
    pub fn register(&self, connection_id: ConnectionId) -> mpsc::UnboundedReceiver<BoardEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock().expect("registry lock poisoned");
        inner.connections.insert(connection_id, (tx, HashSet::new()));
        rx
    }

    /// Subscribe a connection to a board's room
    ///
    /// Join requests are pre-authorized by the invite layer; membership
    /// roles are not re-checked here. Joining the same room twice is a
    /// no-op. Returns false if the connection is not registered.
    pub fn join(&self, connection_id: ConnectionId, board_id: Uuid) -> bool {
        let mut inner = self.inner.lock().expect("registry lock poisoned");
        let Some((tx, joined)) = inner.connections.get_mut(&connection_id) else {
            return false;
        };
        let tx = tx.clone();
        joined.insert(board_id);
        inner
            .rooms
            .entry(board_id)
            .or_default()
            .insert(connection_id, tx);
        true
    }

    /// Unsubscribe a connection from a board's room
    pub fn leave(&self, connection_id: ConnectionId, board_id: Uuid) {
        let mut inner = self.inner.lock().expect("registry lock poisoned");
        if let Some((_, joined)) = inner.connections.get_mut(&connection_id) {
            joined.remove(&board_id);
        }
        if let Some(room) = inner.rooms.get_mut(&board_id) {
            room.remove(&connection_id);
            if room.is_empty() {
                inner.rooms.remove(&board_id);
            }
        }
    }

    /// Remove a connection from the registry and every room it joined
    ///
    /// Called on disconnect; must not rely on the client having sent an
    /// explicit leave first.
    pub fn remove_connection(&self, connection_id: ConnectionId) {
        let mut inner = self.inner.lock().expect("registry lock poisoned");
        Self::drop_member(&mut inner, connection_id);
    }

    /// Fan an event out to every member of a board's room
    ///
    /// `skip` excludes the originating connection, when known. Members
    /// whose receiving task has gone away are pruned; their failure never
    /// affects delivery to the other members. Returns the number of
    /// members the event was enqueued for.
    pub fn broadcast(
        &self,
        board_id: Uuid,
        event: &BoardEvent,
        skip: Option<ConnectionId>,
    ) -> usize {
        let mut inner = self.inner.lock().expect("registry lock poisoned");
        let Some(room) = inner.rooms.get(&board_id) else {
            return 0;
        };

        let mut delivered = 0;
        let mut dead: Vec<ConnectionId> = Vec::new();
        for (member, tx) in room {
            if Some(*member) == skip {
                continue;
            }
            if tx.send(event.clone()).is_ok() {
                delivered += 1;
            } else {
                dead.push(*member);
            }
        }

        for member in dead {
            tracing::debug!("[Rooms] Pruning dead connection {}", member);
            Self::drop_member(&mut inner, member);
        }

        delivered
    }

    /// Number of members currently in a board's room
    pub fn member_count(&self, board_id: Uuid) -> usize {
        let inner = self.inner.lock().expect("registry lock poisoned");
        inner.rooms.get(&board_id).map_or(0, HashMap::len)
    }

    /// Rooms a connection currently belongs to
    pub fn rooms_of(&self, connection_id: ConnectionId) -> Vec<Uuid> {
        let inner = self.inner.lock().expect("registry lock poisoned");
        inner
            .connections
            .get(&connection_id)
            .map(|(_, joined)| joined.iter().copied().collect())
            .unwrap_or_default()
    }

    fn drop_member(inner: &mut RegistryInner, connection_id: ConnectionId) {
        if let Some((_, joined)) = inner.connections.remove(&connection_id) {
            for board_id in joined {
                if let Some(room) = inner.rooms.get_mut(&board_id) {
                    room.remove(&connection_id);
                    if room.is_empty() {
                        inner.rooms.remove(&board_id);
                    }
                }
            }
        }
    }
}
