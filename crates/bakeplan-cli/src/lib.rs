//! Bakeplan CLI library.
//!
//! This crate provides the command implementations behind the `bakeplan`
//! binary: config validation, plan generation, and preset management.

pub mod commands;
pub mod input;
