//! Room Membership
//!
//! Tracks which live connections are subscribed to which board, and fans
//! board-scoped events out to room members. Room lifecycle is purely
//! derived from membership count; nothing here is persisted.

pub mod registry;

pub use registry::{ConnectionId, EventSender, RoomRegistry};
