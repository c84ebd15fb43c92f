//! Game simulation system
//!
//! Manages the game loop simulation including:
//! - Delta time calculation and clamping
//! - Input → movement intent
//! - World stepping
//! - Clearing the jump request once the controller uses it

use std::time::Instant;

use parkour_core::{FrameReport, World};
use parkour_input::IntentController;

/// Manages the game simulation loop
pub struct SimulationSystem {
    last_frame: Instant,
    max_delta: f32,
    elapsed: f32,
}

impl SimulationSystem {
    /// Create a new simulation system
    ///
    /// Frame deltas larger than `max_delta` seconds are clamped so a stall
    /// never turns into one huge physics step.
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            max_delta,
            elapsed: 0.0,
        }
    }

    /// Seconds of simulated time so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Clamp a raw frame delta into `0..=max_delta`
    pub fn clamp_delta(&self, raw_dt: f32) -> f32 {
        if raw_dt.is_nan() {
            return 0.0;
        }
        raw_dt.clamp(0.0, self.max_delta)
    }

    /// Run one frame using wall-clock time since the previous call
    pub fn update(&mut self, world: &mut World, input: &mut IntentController) -> FrameReport {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.step(world, input, raw_dt)
    }

    /// Run one frame with an explicit delta
    pub fn step(&mut self, world: &mut World, input: &mut IntentController, raw_dt: f32) -> FrameReport {
        let dt = self.clamp_delta(raw_dt);
        let intent = input.intent();

        let report = world.update(&intent, dt);

        // An unused request stays pending so it fires on landing or at a wall
        if report.player.jump.is_some() {
            input.consume_jump();
        }

        self.elapsed += dt;
        report
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkour_core::{Level, ShapeDescriptor, WorldSettings};
    use parkour_input::Control;
    use parkour_physics::JumpKind;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> World {
        let mut level = Level::new("Flat").with_spawn(0.0, 1.8, 0.0);
        level.add_shape(ShapeDescriptor::Box {
            position: [0.0, -0.5, 0.0],
            size: [40.0, 1.0, 40.0],
        });
        World::new(&level, WorldSettings::default(), 7)
    }

    fn settle(sim: &mut SimulationSystem, world: &mut World, input: &mut IntentController) {
        for _ in 0..5 {
            sim.step(world, input, DT);
        }
        assert!(world.player().on_ground);
    }

    #[test]
    fn test_delta_clamped() {
        let sim = SimulationSystem::new(0.1);
        assert_eq!(sim.clamp_delta(0.5), 0.1);
        assert_eq!(sim.clamp_delta(-1.0), 0.0);
        assert_eq!(sim.clamp_delta(f32::NAN), 0.0);
        assert_eq!(sim.clamp_delta(0.016), 0.016);
    }

    #[test]
    fn test_stall_advances_by_max_delta() {
        let mut sim = SimulationSystem::default();
        let mut world = world();
        let mut input = IntentController::new();
        sim.step(&mut world, &mut input, 3.0);
        assert!((sim.elapsed() - 0.1).abs() < 0.0001);
    }

    #[test]
    fn test_consumed_jump_is_cleared() {
        let mut sim = SimulationSystem::default();
        let mut world = world();
        let mut input = IntentController::new();
        settle(&mut sim, &mut world, &mut input);

        input.process_control(Control::Jump, true);
        let report = sim.step(&mut world, &mut input, DT);
        assert_eq!(report.player.jump, Some(JumpKind::Ground));
        assert!(!input.intent().jump, "held key does not re-trigger");
        assert!(world.player().velocity.y > 0.0);
    }

    #[test]
    fn test_unused_jump_stays_pending_in_air() {
        let mut sim = SimulationSystem::default();
        let mut world = world();
        let mut input = IntentController::new();
        world.teleport_player(parkour_core::Vec3::new(0.0, 10.0, 0.0));

        input.process_control(Control::Jump, true);
        let report = sim.step(&mut world, &mut input, DT);
        assert_eq!(report.player.jump, None);
        assert!(input.intent().jump);
    }

    #[test]
    fn test_wall_clock_update_runs() {
        let mut sim = SimulationSystem::default();
        let mut world = world();
        let mut input = IntentController::new();
        std::thread::sleep(std::time::Duration::from_millis(5));
        sim.update(&mut world, &mut input);
        assert!(sim.elapsed() > 0.0 && sim.elapsed() <= 0.1);
    }
}
