//! Mutation Store
//!
//! Authoritative persistent state for boards, columns, cards, notes and
//! activity records, exposed as atomic create/update/delete/move operations
//! keyed by entity id.
//!
//! The commit point is the in-memory [`state::BoardStore`]; the
//! [`db`] module mirrors committed writes to PostgreSQL when a pool is
//! configured and restores state at startup.

pub mod db;
pub mod state;

pub use state::BoardStore;
