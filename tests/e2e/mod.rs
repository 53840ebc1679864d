//! E2E test suite for BoardSync
//!
//! End-to-end tests against a live server using the client library.

pub mod sync_suite;
