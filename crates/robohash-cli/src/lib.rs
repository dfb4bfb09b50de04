//! RoboHash CLI library.
//!
//! Command implementations, configuration resolution and logging setup for
//! the `robohash` binary.

pub mod commands;
pub mod logging;
pub mod settings;
