//! Static collision primitives and ray queries
//!
//! Boxes are axis-aligned. Ramps are yawed wedge prisms whose sloped top is
//! queried with rays rather than box overlap.

use parkour_math::Vec3;

/// An axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min_components(max),
            max: min.max_components(max),
        }
    }

    /// Create an AABB centered at a position with the given full size
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        Self::from_center_half_extents(center, size * 0.5)
    }

    /// Create an AABB centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Smallest box containing every point
    pub fn enclosing(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min = min.min_components(*p);
            max = max.max_components(*p);
        }
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if a point is inside or on the box
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Strict overlap: boxes that only touch do not overlap
    pub fn overlaps(&self, other: &Self) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
            && self.max.z > other.min.z
            && self.min.z < other.max.z
    }

    /// Strict overlap of the XZ footprints
    pub fn overlaps_footprint(&self, other: &Self) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.z > other.min.z
            && self.min.z < other.max.z
    }

    pub fn translated(&self, delta: Vec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Cast a ray against the box surface (slab method)
    ///
    /// Rays starting inside the box report no hit, matching front-face-only
    /// picking.
    pub fn ray_cast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        let origin = [ray.origin.x, ray.origin.y, ray.origin.z];
        let dir = [ray.direction.x, ray.direction.y, ray.direction.z];
        let min = [self.min.x, self.min.y, self.min.z];
        let max = [self.max.x, self.max.y, self.max.z];
        let axes = [Vec3::X, Vec3::Y, Vec3::Z];

        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut normal = Vec3::ZERO;

        for i in 0..3 {
            if dir[i].abs() < f32::EPSILON {
                if origin[i] < min[i] || origin[i] > max[i] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir[i];
            let (t_near, t_far, near_normal) = if inv >= 0.0 {
                ((min[i] - origin[i]) * inv, (max[i] - origin[i]) * inv, -axes[i])
            } else {
                ((max[i] - origin[i]) * inv, (min[i] - origin[i]) * inv, axes[i])
            };
            if t_near > t_enter {
                t_enter = t_near;
                normal = near_normal;
            }
            t_exit = t_exit.min(t_far);
            if t_enter > t_exit {
                return None;
            }
        }

        if t_enter < 0.0 || t_enter > max_distance {
            return None;
        }
        Some(RayHit {
            distance: t_enter,
            point: ray.at(t_enter),
            normal,
        })
    }
}

/// A half-line with a unit direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; the direction is normalized
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalized(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a ray query
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Outward surface normal at the hit point
    pub normal: Vec3,
}

/// A ramp: a wedge prism with a triangular side profile
///
/// In its local frame the footprint spans `width` on X and `depth` on Z,
/// centered on `position` (which sits at the ramp's base). The top surface
/// rises linearly from 0 at local +Z to `height` at local -Z, where a
/// vertical back face closes the wedge. `rotation` yaws the whole shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RampWedge {
    pub position: Vec3,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub rotation: f32,
}

impl RampWedge {
    pub fn new(position: Vec3, width: f32, height: f32, depth: f32, rotation: f32) -> Self {
        Self {
            position,
            width,
            height,
            depth,
            rotation,
        }
    }

    fn to_local(&self, point: Vec3) -> Vec3 {
        (point - self.position).rotate_y(-self.rotation)
    }

    fn to_world(&self, local: Vec3) -> Vec3 {
        local.rotate_y(self.rotation) + self.position
    }

    /// Height of the slope above the base at local depth coordinate `v`
    fn profile_height(&self, v: f32) -> f32 {
        self.height * (self.depth * 0.5 - v) / self.depth
    }

    /// World-space height of the slope surface above (x, z), if inside the footprint
    pub fn surface_height_at(&self, x: f32, z: f32) -> Option<f32> {
        let local = self.to_local(Vec3::new(x, self.position.y, z));
        let hw = self.width * 0.5;
        let hd = self.depth * 0.5;
        if local.x.abs() > hw || local.z.abs() > hd {
            return None;
        }
        Some(self.position.y + self.profile_height(local.z))
    }

    /// Outward unit normal of the sloped top, in world space
    pub fn surface_normal(&self) -> Vec3 {
        Vec3::new(0.0, self.depth, self.height)
            .normalized()
            .rotate_y(self.rotation)
    }

    /// Axis-aligned bounds enclosing all six corners
    pub fn bounding_box(&self) -> Aabb {
        let hw = self.width * 0.5;
        let hd = self.depth * 0.5;
        let corners = [
            Vec3::new(-hw, 0.0, -hd),
            Vec3::new(hw, 0.0, -hd),
            Vec3::new(-hw, 0.0, hd),
            Vec3::new(hw, 0.0, hd),
            Vec3::new(-hw, self.height, -hd),
            Vec3::new(hw, self.height, -hd),
        ]
        .map(|c| self.to_world(c));
        Aabb::enclosing(&corners).unwrap_or(Aabb::new(self.position, self.position))
    }

    /// Local-frame half-spaces `n · p <= d` whose intersection is the wedge
    fn half_spaces(&self) -> [(Vec3, f32); 5] {
        let hw = self.width * 0.5;
        let hd = self.depth * 0.5;
        let slope_len = (self.depth * self.depth + self.height * self.height).sqrt();
        [
            (Vec3::new(-1.0, 0.0, 0.0), hw),
            (Vec3::new(1.0, 0.0, 0.0), hw),
            (Vec3::new(0.0, -1.0, 0.0), 0.0),
            (Vec3::new(0.0, 0.0, -1.0), hd),
            (
                Vec3::new(0.0, self.depth / slope_len, self.height / slope_len),
                self.height * hd / slope_len,
            ),
        ]
    }

    /// Cast a ray against the wedge (clipping against its five planes)
    ///
    /// Like [`Aabb::ray_cast`], a ray that starts inside reports no hit.
    pub fn ray_cast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        let origin = self.to_local(ray.origin);
        let direction = ray.direction.rotate_y(-self.rotation);

        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut normal = Vec3::ZERO;

        for (n, d) in self.half_spaces() {
            let denom = n.dot(direction);
            let dist = d - n.dot(origin);
            if denom.abs() < f32::EPSILON {
                if dist < 0.0 {
                    return None;
                }
                continue;
            }
            let t = dist / denom;
            if denom < 0.0 {
                if t > t_enter {
                    t_enter = t;
                    normal = n;
                }
            } else {
                t_exit = t_exit.min(t);
            }
            if t_enter > t_exit {
                return None;
            }
        }

        if t_enter < 0.0 || t_enter > max_distance {
            return None;
        }
        Some(RayHit {
            distance: t_enter,
            point: ray.at(t_enter),
            normal: normal.rotate_y(self.rotation),
        })
    }
}
