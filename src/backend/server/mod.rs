//! Server Module
//!
//! Server initialization, application state and configuration.
//!
//! - **`init`** - Application assembly and state restoration
//! - **`state`** - `AppState` container and `FromRef` extraction
//! - **`config`** - Environment-driven configuration loading

pub mod config;
pub mod init;
pub mod state;

pub use init::create_app;
pub use state::AppState;
