//! Activity Feed
//!
//! The append-only workspace activity log: the recorder turns committed
//! mutations into immutable entries and broadcasts them, the handlers
//! serve the feed over REST.

pub mod handlers;
pub mod recorder;

pub use recorder::record;
