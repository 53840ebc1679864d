//! Cards
//!
//! REST handlers for card mutations, each one a commit-then-broadcast
//! pipeline into the board's room.

pub mod handlers;
