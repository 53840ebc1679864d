/**
 * Real-time Event Broadcasting
 *
 * This module wraps the Mutation Store's commit point: after each
 * successful write, handlers call into the broadcaster to publish a typed
 * event. Board-scoped events fan out through the Room Membership Registry;
 * workspace activity events travel on a separate `tokio::sync::broadcast`
 * channel that every authenticated connection subscribes to.
 *
 * Events are fire-and-forget: they are not persisted and not replayable.
 * A publish with no live subscribers is not an error.
 */

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::backend::rooms::{ConnectionId, RoomRegistry};
use crate::shared::{Activity, BoardEvent};

/// Workspace-wide activity event broadcast
///
/// This channel is not board-scoped: any connected participant receives
/// every `activity:new` event.
pub type ActivityBroadcast = broadcast::Sender<Activity>;

/// Broadcaster for committed mutations
///
/// Cheap to clone and shared across all handlers. `publish` must only be
/// called after the corresponding store write has committed.
#[derive(Clone)]
pub struct EventBroadcaster {
    rooms: RoomRegistry,
    activity_tx: ActivityBroadcast,
}

impl EventBroadcaster {
    /// Create a broadcaster over the given registry
    pub fn new(rooms: RoomRegistry) -> Self {
        // Capacity of 1000 should be more than enough for an activity feed
        let (activity_tx, _) = broadcast::channel(1000);
        Self { rooms, activity_tx }
    }

    /// The registry this broadcaster fans out through
    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    /// Publish a board-scoped event to the board's room
    ///
    /// Synchronous and never awaits, so mutation handlers call it while
    /// still holding the store's write guard: writers serialize on that
    /// guard, which makes delivery order match commit order. `origin`
    /// excludes the originating connection when the mutation request
    /// identified one. Returns the number of members reached.
    pub fn publish(
        &self,
        board_id: Uuid,
        event: BoardEvent,
        origin: Option<ConnectionId>,
    ) -> usize {
        let delivered = self.rooms.broadcast(board_id, &event, origin);
        tracing::info!(
            "[Realtime] {} broadcast to {} members of board {}",
            event.name(),
            delivered,
            board_id
        );
        delivered
    }

    /// Publish an activity entry on the workspace-wide channel
    ///
    /// Returns the number of active subscribers that received the event
    /// (0 if no subscribers, which is fine).
    pub fn publish_activity(&self, activity: Activity) -> usize {
        match self.activity_tx.send(activity) {
            Ok(subscriber_count) => {
                tracing::debug!(
                    "[Realtime] activity:new broadcast to {} subscribers",
                    subscriber_count
                );
                subscriber_count
            }
            Err(_) => {
                // No subscribers, that's okay
                tracing::debug!("[Realtime] No subscribers for activity event");
                0
            }
        }
    }

    /// Subscribe to the workspace activity channel
    pub fn subscribe_activity(&self) -> broadcast::Receiver<Activity> {
        self.activity_tx.subscribe()
    }
}
