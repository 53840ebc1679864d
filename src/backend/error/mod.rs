//! Backend Error Module
//!
//! Error types for the HTTP mutation surface and their conversion to
//! responses.
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - `IntoResponse` implementation
//!
//! Store-layer failures abort the mutation and prevent any broadcast;
//! broadcast-layer failures are isolated per connection and never roll
//! back a committed mutation.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
