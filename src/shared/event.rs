/**
 * Real-time Event System
 *
 * This module defines the typed events exchanged over the socket surface:
 * board-scoped mutation events fanned out to room members, the workspace
 * activity event, and the join/leave frames clients send to the server.
 *
 * Events are tagged JSON on the wire so that the event name travels with
 * the payload:
 *
 * ```json
 * {"event":"card:moved","data":{"cardId":"...","columnId":"..."}}
 * ```
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::activity::Activity;
use crate::shared::card::Card;

/// Payload of a `card:delete` event
///
/// Accepts `_id` as an alias on input so that payloads produced by
/// document-store backed peers deserialize cleanly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardDeleted {
    #[serde(alias = "_id")]
    pub id: Uuid,
}

/// Payload of a `card:moved` event
///
/// Carries only the card id and its new column; every other card field is
/// left untouched by the receiving cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CardMoved {
    pub card_id: Uuid,
    pub column_id: Uuid,
}

/// Discriminant of a board event, used by clients to register handlers
/// for a subset of event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    CardCreate,
    CardUpdate,
    CardDelete,
    CardMoved,
    ActivityNew,
}

/// A server-originated real-time event
///
/// Create and update events carry the full card so receivers never need a
/// follow-up fetch; delete carries only the id; move carries the id and the
/// target column. `ActivityNew` is the one event delivered on the
/// workspace-wide channel rather than a board room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum BoardEvent {
    #[serde(rename = "card:create")]
    CardCreate(Card),
    #[serde(rename = "card:update")]
    CardUpdate(Card),
    #[serde(rename = "card:delete")]
    CardDelete(CardDeleted),
    #[serde(rename = "card:moved")]
    CardMoved(CardMoved),
    #[serde(rename = "activity:new")]
    ActivityNew(Activity),
}

impl BoardEvent {
    /// The kind discriminant for this event
    pub fn kind(&self) -> EventKind {
        match self {
            Self::CardCreate(_) => EventKind::CardCreate,
            Self::CardUpdate(_) => EventKind::CardUpdate,
            Self::CardDelete(_) => EventKind::CardDelete,
            Self::CardMoved(_) => EventKind::CardMoved,
            Self::ActivityNew(_) => EventKind::ActivityNew,
        }
    }

    /// Wire name of this event
    pub fn name(&self) -> &'static str {
        match self {
            Self::CardCreate(_) => "card:create",
            Self::CardUpdate(_) => "card:update",
            Self::CardDelete(_) => "card:delete",
            Self::CardMoved(_) => "card:moved",
            Self::ActivityNew(_) => "activity:new",
        }
    }
}

/// A client-originated frame: room join/leave requests
///
/// These are the only messages clients send over the socket; all mutations
/// go through the REST surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data")]
pub enum ClientFrame {
    #[serde(rename = "joinBoard")]
    JoinBoard(Uuid),
    #[serde(rename = "leaveBoard")]
    LeaveBoard(Uuid),
}
