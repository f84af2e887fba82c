//! CLI command implementations

pub mod plan;
pub mod preset;
pub mod validate;
