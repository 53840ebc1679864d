//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Authentication test helpers
//! - Board and card fixtures

pub mod auth_helpers;
pub mod fixtures;

// Re-export commonly used utilities
pub use auth_helpers::*;
pub use fixtures::*;
