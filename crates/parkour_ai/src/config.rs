//! AI tuning and per-tick decision probabilities

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Probability per tick of each randomized AI decision
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionTable {
    /// Enter parkour mode while grounded and off cooldown
    pub parkour_start: f64,
    /// Slide during the parkour approach
    pub parkour_slide: f64,
    /// Evasive slide while the pursuer is very close
    pub panic_slide: f64,
    /// Evasive jump while the pursuer is within the panic radius
    pub panic_jump: f64,
    /// Idle jump while fleeing at cruise speed
    pub idle_jump: f64,
    /// Idle slide while fleeing at cruise speed
    pub idle_slide: f64,
    /// Slide attack inside the attack band
    pub chase_slide: f64,
    pub chase_jump: f64,
    /// Chance that an elevated platform replaces the current parkour candidate
    pub platform_preference: f64,
}

impl Default for DecisionTable {
    fn default() -> Self {
        Self {
            parkour_start: 0.02,
            parkour_slide: 0.05,
            panic_slide: 0.03,
            panic_jump: 0.04,
            idle_jump: 0.015,
            idle_slide: 0.01,
            chase_slide: 0.02,
            chase_jump: 0.04,
            platform_preference: 0.3,
        }
    }
}

/// Roll a decision with probability `p`
///
/// Out-of-range probabilities are clamped, so 0.0 never fires and 1.0 always does.
pub fn roll<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    if p.is_nan() {
        return false;
    }
    rng.gen_bool(p.clamp(0.0, 1.0))
}

/// AI steering, timing and pose tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Flee speed when the pursuer is far away
    pub cruise_speed: f32,
    /// Panic flee, chase and parkour approach speed
    pub pursuit_speed: f32,
    /// Speed while sliding during a panic flee or a chase
    pub slide_speed: f32,

    pub panic_radius: f32,
    pub panic_slide_radius: f32,
    /// Distance of the immediate flee target while panicking
    pub panic_flee_distance: f32,
    pub flee_min_distance: f32,
    pub flee_max_distance: f32,
    /// Maximum angular deviation of a flee target from straight away (radians)
    pub flee_deviation: f32,
    pub retarget_min: f32,
    pub retarget_max: f32,
    /// Distance at which a flee or parkour target counts as reached
    pub arrival_radius: f32,
    /// Minimum flat distance to a target before steering applies
    pub steering_deadzone: f32,
    pub attack_min: f32,
    pub attack_max: f32,

    pub parkour_min_range: f32,
    pub parkour_max_range: f32,
    /// Parkour targets farther than this are abandoned
    pub parkour_abandon: f32,
    pub parkour_jump: f32,
    /// Horizontal speed of the jump toward a reached parkour target
    pub parkour_boost: f32,
    pub parkour_cooldown: f32,
    pub parkour_slide_min: f32,
    pub parkour_slide_max: f32,
    /// Box centers above this height count as elevated platforms
    pub elevated_min_height: f32,

    pub panic_jump_velocity: f32,
    pub idle_jump_min: f32,
    pub idle_jump_max: f32,
    pub chase_jump_velocity: f32,
    pub panic_jump_cooldown: f32,
    pub idle_jump_cooldown: f32,
    pub chase_jump_cooldown: f32,
    pub parkour_jump_cooldown: f32,

    pub panic_slide_time: f32,
    pub idle_slide_time: f32,
    pub attack_slide_time: f32,
    pub parkour_slide_time: f32,

    /// Cardinal wall probe distance that engages a wall-run
    pub wall_engage_distance: f32,
    /// Minimum vertical velocity on engaging a wall-run
    pub wall_boost: f32,
    pub wall_kick_up: f32,
    pub wall_kick_out: f32,
    /// Parkour cooldown after kicking off an expired wall-run
    pub wall_kick_cooldown: f32,

    /// AI position is clamped to +/- this on X and Z
    pub arena_half_extent: f32,
    /// Flee targets are clamped to +/- this on X and Z
    pub target_half_extent: f32,

    pub crouch_scale: f32,
    pub crouch_rate: f32,
    pub lean_tilt: f32,
    pub lean_rate: f32,

    pub decisions: DecisionTable,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            cruise_speed: 10.0,
            pursuit_speed: 14.0,
            slide_speed: 18.0,

            panic_radius: 15.0,
            panic_slide_radius: 8.0,
            panic_flee_distance: 30.0,
            flee_min_distance: 30.0,
            flee_max_distance: 50.0,
            flee_deviation: std::f32::consts::FRAC_PI_2,
            retarget_min: 2.0,
            retarget_max: 4.0,
            arrival_radius: 3.0,
            steering_deadzone: 0.5,
            attack_min: 3.0,
            attack_max: 10.0,

            parkour_min_range: 5.0,
            parkour_max_range: 40.0,
            parkour_abandon: 50.0,
            parkour_jump: 14.0,
            parkour_boost: 10.0,
            parkour_cooldown: 3.0,
            parkour_slide_min: 4.0,
            parkour_slide_max: 8.0,
            elevated_min_height: 1.0,

            panic_jump_velocity: 12.0,
            idle_jump_min: 10.0,
            idle_jump_max: 14.0,
            chase_jump_velocity: 11.0,
            panic_jump_cooldown: 1.5,
            idle_jump_cooldown: 2.0,
            chase_jump_cooldown: 1.2,
            parkour_jump_cooldown: 0.5,

            panic_slide_time: 0.8,
            idle_slide_time: 0.6,
            attack_slide_time: 0.6,
            parkour_slide_time: 0.5,

            wall_engage_distance: 1.2,
            wall_boost: 2.0,
            wall_kick_up: 12.0,
            wall_kick_out: 8.0,
            wall_kick_cooldown: 2.0,

            arena_half_extent: 145.0,
            target_half_extent: 140.0,

            crouch_scale: 0.5,
            crouch_rate: 10.0,
            lean_tilt: 0.3,
            lean_rate: 5.0,

            decisions: DecisionTable::default(),
        }
    }
}
