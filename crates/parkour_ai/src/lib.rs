//! AI opponent for the tag minigame
//!
//! The AI reuses the shared character physics with synthesized steering in
//! place of player input:
//! - Flee, chase and parkour modes with probabilistic flourishes
//! - Parkour target discovery among walls and elevated platforms
//! - The tag coordinator that swaps the "it" role on capture

pub mod agent;
pub mod config;
pub mod tag;
pub mod targets;

pub use agent::{AiAgent, AiController, AiMode, PoseHints};
pub use config::{AiConfig, DecisionTable};
pub use tag::{Side, TagConfig, TagCoordinator, TagEvent};
pub use targets::{find_parkour_target, ParkourTarget, TargetKind};
