//! Application systems
//!
//! Frame orchestration and scripted input, kept out of main.rs so they can be tested.

mod demo;
mod simulation;

pub use demo::DemoDriver;
pub use simulation::SimulationSystem;
