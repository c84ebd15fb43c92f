//! Core simulation types for the parkour game
//!
//! This crate ties the physics and AI crates into a playable world:
//!
//! - [`World`] - Owns the geometry, the player, the tag game and the time trial
//! - [`Level`] - Loadable/saveable level containing shapes and courses
//! - [`LevelValidator`] - Authoring-time checks for levels
//! - [`Course`] / [`TimeTrial`] - Goal-and-clock challenges

mod level;
mod level_validator;
mod time_trial;
mod world;

pub use level::{Level, LevelLoadError, LevelSaveError};
pub use level_validator::{LevelValidator, ValidationError};
pub use time_trial::{format_time, Course, TimeTrial, TrialStatus};
pub use world::{FrameReport, TagGame, World, WorldError, WorldSettings};

// Re-export commonly used types for convenience
pub use parkour_ai::{AiAgent, AiMode, Side, TagEvent};
pub use parkour_math::Vec3;
pub use parkour_physics::{Character, MovementIntent, MovementStatus, ShapeDescriptor};
