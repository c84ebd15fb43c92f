//! Parkour tag simulation
//!
//! Application layer on top of the workspace crates: configuration loading
//! and the per-frame systems the binary drives.

pub mod config;
pub mod systems;
