//! Boards
//!
//! REST handlers for board create/list/fetch.

pub mod handlers;
