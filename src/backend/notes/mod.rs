//! Notes
//!
//! REST handlers for the per-board note document.

pub mod handlers;
