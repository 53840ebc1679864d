/**
 * Board Note Data Structure
 *
 * Each board has at most one note document. Notes are created lazily on
 * first write (upsert semantics) and are never explicitly deleted.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single free-form note attached to a board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub board_id: Uuid,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a note for a board with the given content
    pub fn new(board_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            board_id,
            content,
            updated_at: Utc::now(),
        }
    }
}

/// Payload for the note upsert (PUT /api/boards/{id}/note)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertNote {
    pub content: String,
}
