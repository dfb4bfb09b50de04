//! Command implementations for the RoboHash CLI

pub mod digest;
pub mod json_output;
pub mod render;
pub mod select;
pub mod sets;
pub mod validate;
