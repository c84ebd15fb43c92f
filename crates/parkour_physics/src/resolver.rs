//! Sub-stepped integration and collision response
//!
//! Each sub-step resolves, in order: box interpenetration (a few passes),
//! ramp ground snapping, ramp face blocking, the fallback ground plane, and
//! the fall-out-of-world respawn. Box and ramp contacts are resolved
//! independently with no arbitration between them.

use crate::character::Character;
use crate::collision::min_translation;
use crate::config::CollisionConfig;
use crate::registry::GeometryRegistry;
use crate::shapes::Ray;
use parkour_math::Vec3;

/// Horizontal directions probed for near-vertical ramp faces
const SIDE_DIRECTIONS: [Vec3; 4] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, -1.0),
];

/// Resolves one character against the static geometry
pub struct CollisionResolver<'a> {
    registry: &'a GeometryRegistry,
    config: &'a CollisionConfig,
}

impl<'a> CollisionResolver<'a> {
    pub fn new(registry: &'a GeometryRegistry, config: &'a CollisionConfig) -> Self {
        Self { registry, config }
    }

    /// Number of sub-steps needed to move at `speed` for `dt`
    ///
    /// At least one, never more than `max_substeps`. Steps stay within
    /// `substep_distance` only up to `substep_distance * max_substeps / dt`;
    /// above that speed a thin obstacle can be stepped through.
    pub fn substep_count(&self, speed: f32, dt: f32) -> u32 {
        let distance = speed * dt;
        if !distance.is_finite() || self.config.substep_distance <= 0.0 {
            return 1;
        }
        let steps = (distance / self.config.substep_distance).ceil();
        (steps as u32).clamp(1, self.config.max_substeps.max(1))
    }

    /// Advance the character by its velocity over `dt`, resolving after each sub-step
    ///
    /// Returns true if the character fell out of the world and was respawned.
    pub fn move_and_resolve(&self, character: &mut Character, dt: f32) -> bool {
        let steps = self.substep_count(character.velocity.length(), dt);
        let sub_dt = dt / steps as f32;
        let mut respawned = false;

        for _ in 0..steps {
            character.position += character.velocity * sub_dt;
            respawned |= self.resolve(character);
            if respawned {
                break;
            }
        }
        respawned
    }

    /// Resolve the character's current position once
    ///
    /// Returns true if the character was respawned.
    pub fn resolve(&self, character: &mut Character) -> bool {
        character.on_ground = false;

        self.resolve_boxes(character);
        self.snap_to_box_tops(character);
        self.resolve_ramp_ground(character);
        self.resolve_ramp_faces(character);
        self.resolve_ground_plane(character);

        if character.position.y < self.config.respawn_depth {
            log::warn!(
                "Character fell out of the world at {:?}, respawning",
                character.position
            );
            character.respawn();
            return true;
        }
        false
    }

    /// Push the character out of every overlapping box along the least-overlap axis
    fn resolve_boxes(&self, character: &mut Character) {
        for _ in 0..self.config.box_passes {
            let mut moved = false;
            for obstacle in self.registry.collidable_boxes() {
                let Some(contact) = min_translation(&character.bounds(), obstacle) else {
                    continue;
                };
                moved = true;
                if contact.is_ceiling() {
                    character.position.y = obstacle.min.y - character.headroom;
                    if character.velocity.y > 0.0 {
                        character.velocity.y = 0.0;
                    }
                } else if contact.is_floor() {
                    character.position.y = obstacle.max.y + character.current_height;
                    if character.velocity.y < 0.0 {
                        character.velocity.y = 0.0;
                    }
                    character.on_ground = true;
                } else if contact.normal.x != 0.0 {
                    character.position.x +=
                        contact.normal.x * (contact.penetration + self.config.push_margin);
                    character.velocity.x = 0.0;
                } else {
                    character.position.z +=
                        contact.normal.z * (contact.penetration + self.config.push_margin);
                    character.velocity.z = 0.0;
                }
            }
            if !moved {
                break;
            }
        }
    }

    /// Feet resting within the snap margin of a box top count as standing on it
    fn snap_to_box_tops(&self, character: &mut Character) {
        if character.on_ground || character.velocity.y > 0.0 {
            return;
        }
        let margin = self.config.ground_snap_margin;
        let bounds = character.bounds();
        let feet = character.feet();
        let support = self
            .registry
            .collidable_boxes()
            .filter(|b| bounds.overlaps_footprint(b))
            .filter(|b| feet >= b.max.y - margin && feet <= b.max.y + margin)
            .map(|b| b.max.y)
            .reduce(f32::max);

        if let Some(top) = support {
            character.position.y = top + character.current_height;
            character.velocity.y = 0.0;
            character.on_ground = true;
        }
    }

    /// Walk on ramp slopes using a downward ray from the reference point
    fn resolve_ramp_ground(&self, character: &mut Character) {
        if character.velocity.y > 0.0 {
            return;
        }
        let ray = Ray::new(character.position, -Vec3::Y);
        let reach = character.current_height + self.config.ramp_probe_extra;
        let Some(hit) = self.registry.ray_cast_ramps(&ray, reach) else {
            return;
        };

        let ground_y = hit.point.y + character.current_height;
        if character.position.y <= ground_y + self.config.ramp_snap_tolerance {
            character.position.y = ground_y;
            if character.velocity.y < 0.0 {
                character.velocity.y = 0.0;
            }
            character.on_ground = true;
        }
    }

    /// Block movement through the steep back and side faces of ramps
    fn resolve_ramp_faces(&self, character: &mut Character) {
        let keep_out = character.radius + self.config.ramp_side_margin;
        let reach = character.radius + self.config.ramp_side_probe;

        for dir in SIDE_DIRECTIONS {
            let feet = Vec3::new(
                character.position.x,
                character.feet() + self.config.feet_probe_lift,
                character.position.z,
            );
            let mid = Vec3::new(
                character.position.x,
                character.position.y - character.current_height * 0.5,
                character.position.z,
            );

            let hit = self
                .registry
                .ray_cast_ramps(&Ray::new(feet, dir), reach)
                .or_else(|| self.registry.ray_cast_ramps(&Ray::new(mid, dir), reach));

            if let Some(hit) = hit {
                if hit.distance < keep_out {
                    character.position -= dir * (keep_out - hit.distance);
                    if dir.x != 0.0 {
                        character.velocity.x = 0.0;
                    } else {
                        character.velocity.z = 0.0;
                    }
                }
            }
        }
    }

    /// Bounded ground plane under the level
    fn resolve_ground_plane(&self, character: &mut Character) {
        let extent = self.config.ground_half_extent;
        if character.position.x.abs() > extent || character.position.z.abs() > extent {
            return;
        }
        let ground = self.config.ground_level;
        let feet = character.feet();
        let resting = feet <= ground + self.config.ground_snap_margin && character.velocity.y <= 0.0;
        if feet < ground || resting {
            character.position.y = ground + character.current_height;
            if character.velocity.y < 0.0 {
                character.velocity.y = 0.0;
            }
            character.on_ground = true;
        }
    }
}
