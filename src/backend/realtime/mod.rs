//! Real-time Layer
//!
//! Event broadcasting and the WebSocket endpoint. The broadcaster is the
//! single publish point for committed mutations; the socket handler owns
//! the per-connection lifecycle, from registration through unclean
//! disconnect cleanup.

pub mod broadcast;
pub mod socket;

pub use broadcast::{ActivityBroadcast, EventBroadcaster};
pub use socket::handle_socket_upgrade;
