//! Parkour target discovery

use rand::Rng;

use crate::config::{roll, AiConfig};
use parkour_math::Vec3;
use parkour_physics::{Aabb, GeometryRegistry};

/// What kind of shape a parkour target is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    Wall,
    Platform,
}

/// A point the AI runs to and jumps at
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParkourTarget {
    pub position: Vec3,
    pub kind: TargetKind,
}

/// Pick a parkour target around `from`
///
/// The nearest wall whose center lies strictly inside the parkour range band
/// is the first candidate. Each elevated platform in the band then replaces
/// the current candidate when there is none, or with the configured
/// platform preference probability.
pub fn find_parkour_target<R: Rng + ?Sized>(
    from: Vec3,
    registry: &GeometryRegistry,
    config: &AiConfig,
    rng: &mut R,
) -> Option<ParkourTarget> {
    let in_band = |distance: f32| {
        distance > config.parkour_min_range && distance < config.parkour_max_range
    };

    let mut best = registry
        .walls()
        .map(Aabb::center)
        .map(|center| (center, from.distance(center)))
        .filter(|(_, distance)| in_band(*distance))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(position, _)| ParkourTarget {
            position,
            kind: TargetKind::Wall,
        });

    for center in registry.elevated_centers(config.elevated_min_height) {
        if !in_band(from.distance(center)) {
            continue;
        }
        if best.is_none() || roll(rng, config.decisions.platform_preference) {
            best = Some(ParkourTarget {
                position: center,
                kind: TargetKind::Platform,
            });
        }
    }

    best
}
