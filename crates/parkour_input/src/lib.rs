//! Parkour input handling
//!
//! This crate turns abstract control presses and mouse motion into the
//! per-frame movement intent consumed by the character controller. It knows
//! nothing about windows or devices; a front end maps its keys to [`Control`].

mod intent_controller;

pub use intent_controller::{Control, IntentController};
