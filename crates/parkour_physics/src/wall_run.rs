//! Wall-run detection
//!
//! The player probes to its right and left; the AI probes the four cardinal
//! directions against authored walls only.

use crate::character::{Character, WallSide};
use crate::collision::SurfaceFlags;
use crate::config::WallRunConfig;
use crate::registry::GeometryRegistry;
use crate::shapes::{Ray, RayHit};
use parkour_math::Vec3;

const CARDINAL_DIRECTIONS: [Vec3; 4] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, -1.0),
];

/// Probes walls beside a character and maintains its wall-run state
pub struct WallRunDetector<'a> {
    registry: &'a GeometryRegistry,
    config: &'a WallRunConfig,
}

impl<'a> WallRunDetector<'a> {
    pub fn new(registry: &'a GeometryRegistry, config: &'a WallRunConfig) -> Self {
        Self { registry, config }
    }

    /// First probe hit toward `direction`, trying each configured height offset in turn
    pub fn probe_side(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        self.config.probe_offsets.iter().find_map(|offset| {
            let ray = Ray::new(origin + Vec3::Y * *offset, direction);
            self.registry
                .ray_cast(&ray, self.config.probe_range, SurfaceFlags::WALL_RUN)
        })
    }

    /// Update wall-run state for one frame
    ///
    /// `right` is the character's unit right vector on the ground plane.
    pub fn update(&self, character: &mut Character, right: Vec3, dt: f32) {
        if character.wall_run_cooldown > 0.0 || character.on_ground {
            character.end_wall_run();
            return;
        }
        if character.horizontal_speed() < self.config.min_speed {
            character.end_wall_run();
            return;
        }

        let rising_too_fast = character.velocity.y >= self.config.max_rise_speed;
        let engaged = if rising_too_fast {
            None
        } else {
            self.probe_side(character.position, right)
                .map(|hit| (WallSide::Right, right, hit))
                .or_else(|| {
                    self.probe_side(character.position, -right)
                        .map(|hit| (WallSide::Left, -right, hit))
                })
        };

        let Some((side, toward_wall, hit)) = engaged else {
            character.end_wall_run();
            return;
        };

        if !character.is_wall_running {
            log::trace!("Wall-run engaged on the {:?} side", side);
        }
        character.is_wall_running = true;
        character.wall_side = side;
        character.wall_run_time += dt;

        if hit.distance > self.config.snug_distance {
            character.position +=
                toward_wall * ((hit.distance - self.config.snug_distance) * self.config.pull_rate);
        }
        if character.velocity.y < 0.0 {
            character.velocity.y *= self.config.slide_damping;
        }

        if character.wall_run_time > self.config.max_time {
            log::trace!("Wall-run expired after {:.2}s", character.wall_run_time);
            character.end_wall_run();
        }
    }

    /// Cardinal direction of an authored wall closer than `max_distance`
    ///
    /// Probes from mid-body height.
    pub fn probe_cardinal(&self, character: &Character, max_distance: f32) -> Option<Vec3> {
        let origin = character.position - Vec3::Y * (character.current_height * 0.5);
        let range = self.config.probe_range.min(max_distance);
        CARDINAL_DIRECTIONS.into_iter().find(|dir| {
            let ray = Ray::new(origin, *dir);
            self.registry
                .ray_cast(&ray, range, SurfaceFlags::WALL)
                .is_some()
        })
    }
}

/// Outward horizontal normal of the wall on `side`
pub fn wall_normal(side: WallSide, right: Vec3) -> Vec3 {
    match side {
        WallSide::Right => -right,
        WallSide::Left => right,
        WallSide::None => Vec3::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MovementConfig;
    use crate::registry::ShapeDescriptor;

    /// A long wall along Z whose near face is at x = 1.0
    fn wall_on_right() -> GeometryRegistry {
        GeometryRegistry::from_descriptors(&[ShapeDescriptor::Wall {
            position: [1.5, 3.0, 0.0],
            size: [1.0, 6.0, 200.0],
        }])
    }

    fn runner() -> Character {
        let mut c = Character::new(Vec3::new(0.0, 4.0, 0.0), &MovementConfig::default());
        c.velocity = Vec3::new(0.0, -3.0, -10.0);
        c
    }

    // Yaw 0 faces -Z, so +X is to the right
    const RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);

    #[test]
    fn test_engages_on_right_wall() {
        let registry = wall_on_right();
        let config = WallRunConfig::default();
        let detector = WallRunDetector::new(&registry, &config);
        let mut c = runner();

        detector.update(&mut c, RIGHT, 0.016);

        assert!(c.is_wall_running);
        assert_eq!(c.wall_side, WallSide::Right);
        assert!((c.wall_run_time - 0.016).abs() < 0.0001);
        assert!(c.velocity.y > -3.0, "falling speed should be damped");
        assert!(c.velocity.y < 0.0, "falling speed is damped, not zeroed");
    }

    #[test]
    fn test_engages_on_left_wall() {
        let registry = wall_on_right();
        let config = WallRunConfig::default();
        let detector = WallRunDetector::new(&registry, &config);
        let mut c = runner();

        // Facing +Z, the right vector is -X and the wall is on the left
        detector.update(&mut c, -RIGHT, 0.016);

        assert!(c.is_wall_running);
        assert_eq!(c.wall_side, WallSide::Left);
    }

    #[test]
    fn test_pulls_toward_wall() {
        let registry = wall_on_right();
        let config = WallRunConfig::default();
        let detector = WallRunDetector::new(&registry, &config);
        let mut c = runner();
        let before = c.position.x;

        detector.update(&mut c, RIGHT, 0.016);

        // Wall face is 1.0 away; pulled by (1.0 - 0.6) * 0.3
        assert!((c.position.x - before - 0.12).abs() < 0.0001);
    }

    #[test]
    fn test_grounded_never_wall_runs() {
        let registry = wall_on_right();
        let config = WallRunConfig::default();
        let detector = WallRunDetector::new(&registry, &config);
        let mut c = runner();
        c.on_ground = true;

        detector.update(&mut c, RIGHT, 0.016);

        assert!(!c.is_wall_running);
    }

    #[test]
    fn test_too_slow_disengages() {
        let registry = wall_on_right();
        let config = WallRunConfig::default();
        let detector = WallRunDetector::new(&registry, &config);
        let mut c = runner();
        detector.update(&mut c, RIGHT, 0.016);
        assert!(c.is_wall_running);

        c.velocity = Vec3::new(0.0, -1.0, -2.0);
        detector.update(&mut c, RIGHT, 0.016);
        assert!(!c.is_wall_running);
        assert_eq!(c.wall_run_time, 0.0);
    }

    #[test]
    fn test_rising_fast_does_not_attach() {
        let registry = wall_on_right();
        let config = WallRunConfig::default();
        let detector = WallRunDetector::new(&registry, &config);
        let mut c = runner();
        c.velocity.y = 8.0;

        detector.update(&mut c, RIGHT, 0.016);

        assert!(!c.is_wall_running);
    }

    #[test]
    fn test_cooldown_blocks_reattach() {
        let registry = wall_on_right();
        let config = WallRunConfig::default();
        let detector = WallRunDetector::new(&registry, &config);
        let mut c = runner();
        c.wall_run_cooldown = 0.2;

        detector.update(&mut c, RIGHT, 0.016);

        assert!(!c.is_wall_running);
    }

    #[test]
    fn test_disengages_after_max_time_with_wall_present() {
        let registry = wall_on_right();
        let config = WallRunConfig::default();
        let detector = WallRunDetector::new(&registry, &config);
        let mut c = runner();
        let dt = 0.1;

        let mut longest = 0.0_f32;
        let mut expired = false;
        for _ in 0..20 {
            let was_running = c.is_wall_running;
            let before = c.wall_run_time;
            c.velocity.y = -3.0;
            detector.update(&mut c, RIGHT, dt);
            longest = longest.max(c.wall_run_time);
            if was_running && !c.is_wall_running {
                assert!(before + dt > config.max_time, "expired early at {}", before);
                expired = true;
                break;
            }
        }

        assert!(expired, "wall-run should expire while the wall is still there");
        assert!(longest <= config.max_time + 0.0001);
        assert_eq!(c.wall_run_time, 0.0);
        assert!(detector.probe_side(c.position, RIGHT).is_some());
    }

    #[test]
    fn test_cardinal_probe_finds_wall() {
        let registry = wall_on_right();
        let config = WallRunConfig::default();
        let detector = WallRunDetector::new(&registry, &config);
        let c = runner();

        assert_eq!(detector.probe_cardinal(&c, 1.2), Some(Vec3::X));

        let far = Character::new(Vec3::new(-5.0, 4.0, 0.0), &MovementConfig::default());
        assert_eq!(detector.probe_cardinal(&far, 1.2), None);
    }

    #[test]
    fn test_wall_normal_points_away() {
        assert_eq!(wall_normal(WallSide::Right, RIGHT), -RIGHT);
        assert_eq!(wall_normal(WallSide::Left, RIGHT), RIGHT);
        assert_eq!(wall_normal(WallSide::None, RIGHT), Vec3::ZERO);
    }
}
