//! Narrow-phase collision tests
//!
//! Provides the minimum-translation box test used for obstacle push-out and
//! the surface capability flags that decide which queries a shape takes part in.

use bitflags::bitflags;

use crate::shapes::Aabb;
use parkour_math::Vec3;

bitflags! {
    /// Capabilities of a static shape
    ///
    /// A shape is stored once in the registry; these flags decide which of
    /// the registry's queries return it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SurfaceFlags: u32 {
        /// Solid box resolved by interpenetration push-out
        const COLLIDABLE = 1 << 0;
        /// Probed by the player's wall-run rays
        const WALL_RUN = 1 << 1;
        /// Authored wall (AI wall-run probe and parkour targets)
        const WALL = 1 << 2;
        /// Sloped ramp surface, resolved with rays
        const RAMP = 1 << 3;
    }
}

impl SurfaceFlags {
    /// Flags for an obstacle or platform box
    pub fn obstacle() -> Self {
        Self::COLLIDABLE | Self::WALL_RUN
    }

    /// Flags for an authored wall
    pub fn wall() -> Self {
        Self::COLLIDABLE | Self::WALL_RUN | Self::WALL
    }

    /// Flags for a ramp wedge
    pub fn ramp() -> Self {
        Self::RAMP | Self::WALL_RUN
    }
}

/// Contact information from a box overlap
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Axis-aligned direction to push the first box out of the second
    pub normal: Vec3,
    /// Overlap depth along `normal`
    pub penetration: f32,
}

impl Contact {
    pub fn new(normal: Vec3, penetration: f32) -> Self {
        Self { normal, penetration }
    }

    /// Contact pushes the mover up (it is standing on the obstacle)
    pub fn is_floor(&self) -> bool {
        self.normal.y > 0.5
    }

    /// Contact pushes the mover down (it bumped its head)
    pub fn is_ceiling(&self) -> bool {
        self.normal.y < -0.5
    }
}

/// Minimum translation of `mover` out of `obstacle`
///
/// Overlap is measured on each axis from both approach directions and the
/// smaller of the two is kept per axis. The vertical axis wins only when
/// strictly smaller than both others, and X wins over Z only when strictly
/// smaller, so ties resolve horizontally. Touching boxes do not collide.
pub fn min_translation(mover: &Aabb, obstacle: &Aabb) -> Option<Contact> {
    if !mover.overlaps(obstacle) {
        return None;
    }

    // Depth if pushed toward -axis, depth if pushed toward +axis
    let x = (mover.max.x - obstacle.min.x, obstacle.max.x - mover.min.x);
    let y = (mover.max.y - obstacle.min.y, obstacle.max.y - mover.min.y);
    let z = (mover.max.z - obstacle.min.z, obstacle.max.z - mover.min.z);

    let overlap_x = x.0.min(x.1);
    let overlap_y = y.0.min(y.1);
    let overlap_z = z.0.min(z.1);

    let contact = if overlap_y < overlap_x && overlap_y < overlap_z {
        if y.0 < y.1 {
            Contact::new(-Vec3::Y, y.0)
        } else {
            Contact::new(Vec3::Y, y.1)
        }
    } else if overlap_x < overlap_z {
        if x.0 < x.1 {
            Contact::new(-Vec3::X, x.0)
        } else {
            Contact::new(Vec3::X, x.1)
        }
    } else if z.0 < z.1 {
        Contact::new(-Vec3::Z, z.0)
    } else {
        Contact::new(Vec3::Z, z.1)
    };

    Some(contact)
}
