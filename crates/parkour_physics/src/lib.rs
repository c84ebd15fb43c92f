//! Character physics for the parkour simulation
//!
//! This crate provides kinematic character movement against static level geometry:
//! - Static shapes (boxes, walls, ramp wedges) in a read-only registry
//! - Box push-out and ray-based ramp walking
//! - Wall-run detection
//! - The per-frame character controller (run, sprint, slide, jump, wall-jump)

pub mod character;
pub mod collision;
pub mod config;
pub mod controller;
pub mod registry;
pub mod resolver;
pub mod shapes;
pub mod wall_run;

// Re-export commonly used types
pub use character::{Character, MovementStatus, WallSide};
pub use collision::{min_translation, Contact, SurfaceFlags};
pub use config::{CollisionConfig, MovementConfig, WallRunConfig};
pub use controller::{CharacterController, FrameOutcome, JumpKind, MovementIntent};
pub use registry::{GeometryRegistry, ShapeDescriptor, ShapeGeometry, ShapeKey, StaticShape};
pub use resolver::CollisionResolver;
pub use shapes::{Aabb, RampWedge, Ray, RayHit};
pub use wall_run::{wall_normal, WallRunDetector};
