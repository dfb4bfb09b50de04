//! RoboHash End-to-End Test Infrastructure
//!
//! Shared fixtures and helpers for the integration tests in `tests/`:
//!
//! - **Golden values**: fixed catalog and expected tokens/tags for known inputs
//! - **Part set fixtures**: temporary `sets/` trees with real PNG parts
//! - **Determinism**: byte-identical output across repeated runs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p robohash-tests
//! ```

pub mod determinism;
pub mod fixtures;
