/**
 * Activity Recorder
 *
 * Converts committed mutations into immutable, append-only activity log
 * entries and publishes each one as an `activity:new` event on the
 * workspace-wide channel.
 *
 * Recording is best-effort and advisory: it has no retry or rollback
 * linkage to the originating mutation. A mutation whose activity entry
 * fails to record (or to mirror) still stands.
 */

use uuid::Uuid;

use crate::backend::server::state::AppState;
use crate::shared::{Activity, EntityType};

/// Record one activity entry and publish it workspace-wide
///
/// Called by mutation handlers after their store write commits. Returns
/// the recorded entry.
pub async fn record(
    state: &AppState,
    board_id: Option<Uuid>,
    user_id: Uuid,
    action: impl Into<String>,
    entity_type: EntityType,
    entity_id: Option<String>,
) -> Activity {
    let activity = Activity::new(board_id, user_id, action, entity_type, entity_id);

    {
        let mut store = state.store.write().await;
        store.append_activity(activity.clone());
        // Publishing under the write guard keeps feed delivery order equal
        // to append order when concurrent mutations race.
        state.broadcaster.publish_activity(activity.clone());
    }
    state.mirror_activity(activity.clone());

    activity
}
