//! Tuning for the character controller, wall-run detector and collision resolver
//!
//! Every struct deserializes with defaults for missing fields so a config
//! file only needs to name the values it changes.

use serde::{Deserialize, Serialize};

/// Character movement tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Reference-point height above the feet while standing
    pub stand_height: f32,
    /// Reference-point height above the feet while sliding
    pub slide_height: f32,
    /// Horizontal collision radius
    pub radius: f32,
    /// Extra collision height above the reference point
    pub headroom: f32,
    pub walk_speed: f32,
    pub sprint_speed: f32,
    /// Slide speed at slide start; decays toward `walk_speed`
    pub slide_speed: f32,
    /// Slide speed lost per second
    pub slide_decay: f32,
    /// Exponential blend rate of the current height toward its target (1/s)
    pub height_blend_rate: f32,
    /// Fraction of target speed added per frame while airborne
    pub air_control: f32,
    /// Horizontal velocity factor per frame when grounded without input
    pub ground_damping: f32,
    /// Horizontal velocity factor per frame when airborne without input
    pub air_damping: f32,
    /// Airborne damping while the slide-jump boost window is open
    pub boost_damping: f32,
    /// Horizontal speed given by a slide-jump
    pub slide_jump_speed: f32,
    /// Slide-jump vertical velocity as a multiple of `jump_force`
    pub slide_jump_factor: f32,
    /// Length of the slide-jump momentum window (s)
    pub slide_boost_time: f32,
    pub jump_force: f32,
    pub gravity: f32,
    pub wall_run: WallRunConfig,
    pub collision: CollisionConfig,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            stand_height: 1.8,
            slide_height: 0.8,
            radius: 0.5,
            headroom: 0.2,
            walk_speed: 12.0,
            sprint_speed: 16.0,
            slide_speed: 16.0,
            slide_decay: 8.0,
            height_blend_rate: 10.0,
            air_control: 0.1,
            ground_damping: 0.2,
            air_damping: 0.88,
            boost_damping: 0.99,
            slide_jump_speed: 20.0,
            slide_jump_factor: 1.4,
            slide_boost_time: 0.8,
            jump_force: 12.0,
            gravity: 25.0,
            wall_run: WallRunConfig::default(),
            collision: CollisionConfig::default(),
        }
    }
}

/// Wall-run detection and wall-jump tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallRunConfig {
    /// Gravity while wall-running
    pub gravity: f32,
    /// Longest continuous wall-run (s)
    pub max_time: f32,
    /// Minimum horizontal speed to start or keep wall-running
    pub min_speed: f32,
    /// Probe ray length
    pub probe_range: f32,
    /// Vertical offsets of the side probes relative to the reference point
    pub probe_offsets: [f32; 3],
    /// Vertical speed at or above which a wall does not engage
    pub max_rise_speed: f32,
    /// Distance to the wall the character is pulled toward
    pub snug_distance: f32,
    /// Fraction of the snug error corrected per frame
    pub pull_rate: f32,
    /// Falling-speed factor per frame while attached
    pub slide_damping: f32,
    pub jump_force: f32,
    /// Outward horizontal speed of a wall-jump
    pub jump_push: f32,
    /// Forward horizontal speed of a wall-jump
    pub jump_forward: f32,
    /// Delay before wall-running is allowed again after a wall-jump (s)
    pub reentry_cooldown: f32,
}

impl Default for WallRunConfig {
    fn default() -> Self {
        Self {
            gravity: 5.0,
            max_time: 1.5,
            min_speed: 5.0,
            probe_range: 1.5,
            probe_offsets: [0.0, -0.5, -1.0],
            max_rise_speed: 5.0,
            snug_distance: 0.6,
            pull_rate: 0.3,
            slide_damping: 0.92,
            jump_force: 14.0,
            jump_push: 8.0,
            jump_forward: 5.0,
            reentry_cooldown: 0.3,
        }
    }
}

/// Collision resolver tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Longest displacement of one integration sub-step
    pub substep_distance: f32,
    /// Hard cap on sub-steps per frame
    pub max_substeps: u32,
    /// Box push-out passes per sub-step
    pub box_passes: u32,
    /// Gap left after a horizontal push-out
    pub push_margin: f32,
    /// Feet this close above a surface count as standing on it
    pub ground_snap_margin: f32,
    /// Extra length of the ramp ground ray below the feet
    pub ramp_probe_extra: f32,
    /// Feet this far above the slope still snap onto it
    pub ramp_snap_tolerance: f32,
    /// Clearance kept from near-vertical ramp faces
    pub ramp_side_margin: f32,
    /// Extra length of the side rays beyond the radius
    pub ramp_side_probe: f32,
    /// Height of the low side ray above the feet
    pub feet_probe_lift: f32,
    /// Height of the fallback ground plane
    pub ground_level: f32,
    /// Half-size of the fallback ground plane on X and Z
    pub ground_half_extent: f32,
    /// Falling below this height respawns the character
    pub respawn_depth: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            substep_distance: 0.5,
            max_substeps: 50,
            box_passes: 3,
            push_margin: 0.01,
            ground_snap_margin: 0.02,
            ramp_probe_extra: 2.0,
            ramp_snap_tolerance: 0.1,
            ramp_side_margin: 0.05,
            ramp_side_probe: 0.1,
            feet_probe_lift: 0.3,
            ground_level: 0.0,
            ground_half_extent: 200.0,
            respawn_depth: -10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let config = MovementConfig::default();
        assert!(config.slide_height < config.stand_height);
        assert!(config.slide_speed >= config.walk_speed);
        assert!(config.wall_run.gravity < config.gravity);
        assert!(config.wall_run.snug_distance > config.radius);
        assert!(config.wall_run.snug_distance < config.wall_run.probe_range);
        assert!(config.collision.max_substeps >= 1);
    }
}
