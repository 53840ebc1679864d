//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the client and backend. These types define the wire format for both the
//! REST surface and the socket event surface, so the same structs are used
//! on the server (authoritative state) and in the client reconciliation
//! cache.

/// Board, column and member structures
pub mod board;

/// Card structure and mutation payloads
pub mod card;

/// Per-board note structure
pub mod note;

/// Workspace activity feed entries
pub mod activity;

/// Real-time event system
pub mod event;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use activity::{Activity, EntityType};
pub use board::{Board, Column, CreateBoard, Member, Role};
pub use card::{Card, CreateCard, MoveCard, UpdateCard};
pub use error::SharedError;
pub use event::{BoardEvent, CardDeleted, CardMoved, ClientFrame, EventKind};
pub use note::{Note, UpsertNote};
