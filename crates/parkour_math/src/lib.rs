//! Vector math for the parkour simulation
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with yaw-basis helpers for ground-plane movement

mod vec3;

pub use vec3::Vec3;
