/**
 * Board Data Structures
 *
 * This module defines the Board aggregate shared between the server and
 * clients: the board itself, its ordered columns, and its member list.
 *
 * Boards are serialized to/from camelCase JSON so that the wire format
 * matches the socket and REST payloads consumed by browser clients.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a board member
///
/// Exactly one member of a board holds the `Owner` role. Roles are granted
/// by the invite layer before a connection is ever allowed to join the
/// board's room; the realtime layer does not re-check them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Editor,
    Viewer,
}

/// A user's membership on a board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub user_id: Uuid,
    pub role: Role,
}

/// A single column on a board
///
/// `order` values are unique within a board and define the display
/// sequence of columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: Uuid,
    pub title: String,
    pub order: i32,
}

/// A kanban board
///
/// This structure is used both on the server (authoritative state) and on
/// the client (the `current_board` projection in the reconciliation cache).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub members: Vec<Member>,
    pub columns: Vec<Column>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoard {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Board {
    /// Create a new board owned by `owner_id`
    ///
    /// The owner is added as the first member with the `Owner` role and
    /// the board starts with the default three columns.
    pub fn new(title: String, description: Option<String>, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            owner_id,
            members: vec![Member {
                user_id: owner_id,
                role: Role::Owner,
            }],
            columns: Self::default_columns(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The default columns every new board starts with
    pub fn default_columns() -> Vec<Column> {
        ["To Do", "In Progress", "Done"]
            .iter()
            .enumerate()
            .map(|(i, title)| Column {
                id: Uuid::new_v4(),
                title: (*title).to_string(),
                order: i as i32,
            })
            .collect()
    }

    /// Check whether `user_id` is a member of this board
    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.members.iter().any(|m| m.user_id == user_id)
    }

    /// Look up a column by id
    pub fn column(&self, column_id: Uuid) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }
}
