//! Static level geometry
//!
//! Shapes are ingested once from descriptors and stored in a slot map. The
//! registry is never written to during gameplay, so collision queries from
//! both characters only ever borrow it immutably.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::collision::SurfaceFlags;
use crate::shapes::{Aabb, RampWedge, Ray, RayHit};
use parkour_math::Vec3;

new_key_type! {
    /// Key to a static shape in the geometry registry
    pub struct ShapeKey;
}

/// Authoring description of a static shape
///
/// Box and wall positions are centers; a ramp's position is the center of
/// its footprint at the base.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ShapeDescriptor {
    /// Obstacle or platform
    Box { position: [f32; 3], size: [f32; 3] },
    /// Wall; collides like a box and is a parkour/wall-run candidate
    Wall { position: [f32; 3], size: [f32; 3] },
    /// Yawed wedge with a walkable slope
    Ramp {
        position: [f32; 3],
        width: f32,
        height: f32,
        depth: f32,
        rotation: f32,
    },
}

/// Concrete geometry of a stored shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeGeometry {
    Box(Aabb),
    Ramp(RampWedge),
}

/// A static shape with its capabilities and precomputed bounds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticShape {
    pub geometry: ShapeGeometry,
    pub flags: SurfaceFlags,
    bounds: Aabb,
}

impl StaticShape {
    /// Build a shape from its authoring description
    pub fn from_descriptor(descriptor: &ShapeDescriptor) -> Self {
        match *descriptor {
            ShapeDescriptor::Box { position, size } => {
                Self::new_box(Aabb::from_center_size(position.into(), size.into()), SurfaceFlags::obstacle())
            }
            ShapeDescriptor::Wall { position, size } => {
                Self::new_box(Aabb::from_center_size(position.into(), size.into()), SurfaceFlags::wall())
            }
            ShapeDescriptor::Ramp {
                position,
                width,
                height,
                depth,
                rotation,
            } => Self::new_ramp(RampWedge::new(position.into(), width, height, depth, rotation)),
        }
    }

    pub fn new_box(aabb: Aabb, flags: SurfaceFlags) -> Self {
        Self {
            geometry: ShapeGeometry::Box(aabb),
            flags,
            bounds: aabb,
        }
    }

    pub fn new_ramp(ramp: RampWedge) -> Self {
        Self {
            geometry: ShapeGeometry::Ramp(ramp),
            flags: SurfaceFlags::ramp(),
            bounds: ramp.bounding_box(),
        }
    }

    /// Axis-aligned bounds (exact for boxes, enclosing for ramps)
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn as_box(&self) -> Option<&Aabb> {
        match &self.geometry {
            ShapeGeometry::Box(aabb) => Some(aabb),
            ShapeGeometry::Ramp(_) => None,
        }
    }

    pub fn as_ramp(&self) -> Option<&RampWedge> {
        match &self.geometry {
            ShapeGeometry::Ramp(ramp) => Some(ramp),
            ShapeGeometry::Box(_) => None,
        }
    }

    pub fn ray_cast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        match &self.geometry {
            ShapeGeometry::Box(aabb) => aabb.ray_cast(ray, max_distance),
            ShapeGeometry::Ramp(ramp) => ramp.ray_cast(ray, max_distance),
        }
    }
}

/// Read-only collection of the level's static shapes
#[derive(Clone, Debug, Default)]
pub struct GeometryRegistry {
    shapes: SlotMap<ShapeKey, StaticShape>,
}

impl GeometryRegistry {
    pub fn new() -> Self {
        Self {
            shapes: SlotMap::with_key(),
        }
    }

    /// Ingest an ordered list of descriptors
    pub fn from_descriptors<'a, I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = &'a ShapeDescriptor>,
    {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.insert(StaticShape::from_descriptor(descriptor));
        }
        registry
    }

    /// Add a shape during level construction
    pub fn insert(&mut self, shape: StaticShape) -> ShapeKey {
        self.shapes.insert(shape)
    }

    pub fn get(&self, key: ShapeKey) -> Option<&StaticShape> {
        self.shapes.get(key)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeKey, &StaticShape)> {
        self.shapes.iter()
    }

    /// Shapes having all of `flags`
    pub fn with_flags(&self, flags: SurfaceFlags) -> impl Iterator<Item = &StaticShape> {
        self.shapes.values().filter(move |s| s.flags.contains(flags))
    }

    /// All boxes resolved by interpenetration push-out
    pub fn collidable_boxes(&self) -> impl Iterator<Item = &Aabb> {
        self.with_flags(SurfaceFlags::COLLIDABLE)
            .filter_map(StaticShape::as_box)
    }

    /// All surfaces the player's wall-run probes consider
    pub fn wall_run_surfaces(&self) -> impl Iterator<Item = &StaticShape> {
        self.with_flags(SurfaceFlags::WALL_RUN)
    }

    /// All ramp wedges
    pub fn ramp_surfaces(&self) -> impl Iterator<Item = &RampWedge> {
        self.with_flags(SurfaceFlags::RAMP)
            .filter_map(StaticShape::as_ramp)
    }

    /// Authored walls only
    pub fn walls(&self) -> impl Iterator<Item = &Aabb> {
        self.with_flags(SurfaceFlags::WALL).filter_map(StaticShape::as_box)
    }

    /// Nearest hit among shapes having all of `flags`
    pub fn ray_cast(&self, ray: &Ray, max_distance: f32, flags: SurfaceFlags) -> Option<RayHit> {
        nearest_hit(
            self.with_flags(flags).map(|s| s.ray_cast(ray, max_distance)),
        )
    }

    /// Nearest hit against ramp wedges
    pub fn ray_cast_ramps(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        nearest_hit(self.ramp_surfaces().map(|r| r.ray_cast(ray, max_distance)))
    }

    /// Highest ramp slope height above (x, z), if any ramp covers that point
    pub fn ramp_height_at(&self, x: f32, z: f32) -> Option<f32> {
        self.ramp_surfaces()
            .filter_map(|r| r.surface_height_at(x, z))
            .reduce(f32::max)
    }

    /// Center of every platform (collidable box that is not a wall) above `min_height`
    pub fn elevated_centers(&self, min_height: f32) -> impl Iterator<Item = Vec3> + '_ {
        self.with_flags(SurfaceFlags::COLLIDABLE)
            .filter(|s| !s.flags.contains(SurfaceFlags::WALL))
            .filter_map(StaticShape::as_box)
            .map(Aabb::center)
            .filter(move |c| c.y > min_height)
    }
}

fn nearest_hit<I>(hits: I) -> Option<RayHit>
where
    I: Iterator<Item = Option<RayHit>>,
{
    hits.flatten()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level() -> Vec<ShapeDescriptor> {
        vec![
            ShapeDescriptor::Box {
                position: [0.0, 0.5, 0.0],
                size: [4.0, 1.0, 4.0],
            },
            ShapeDescriptor::Wall {
                position: [10.0, 2.0, 0.0],
                size: [1.0, 4.0, 10.0],
            },
            ShapeDescriptor::Ramp {
                position: [-10.0, 0.0, 0.0],
                width: 4.0,
                height: 2.0,
                depth: 8.0,
                rotation: 0.0,
            },
        ]
    }

    #[test]
    fn test_ingest_descriptors() {
        let registry = GeometryRegistry::from_descriptors(&level());
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_queries_use_capabilities() {
        let registry = GeometryRegistry::from_descriptors(&level());
        assert_eq!(registry.collidable_boxes().count(), 2, "box and wall collide");
        assert_eq!(registry.wall_run_surfaces().count(), 3, "every shape is wall-runnable");
        assert_eq!(registry.ramp_surfaces().count(), 1);
        assert_eq!(registry.walls().count(), 1);
    }

    #[test]
    fn test_ray_cast_returns_nearest() {
        let mut descriptors = level();
        descriptors.push(ShapeDescriptor::Wall {
            position: [20.0, 2.0, 0.0],
            size: [1.0, 4.0, 10.0],
        });
        let registry = GeometryRegistry::from_descriptors(&descriptors);
        let ray = Ray::new(Vec3::new(5.0, 1.5, 0.0), Vec3::X);
        let hit = registry
            .ray_cast(&ray, 50.0, SurfaceFlags::WALL)
            .expect("ray should hit the first wall");
        assert!((hit.distance - 4.5).abs() < 0.0001);
    }

    #[test]
    fn test_ray_cast_filters_by_flags() {
        let registry = GeometryRegistry::from_descriptors(&level());
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::Y);
        assert!(registry.ray_cast(&ray, 10.0, SurfaceFlags::COLLIDABLE).is_some());
        assert!(registry.ray_cast(&ray, 10.0, SurfaceFlags::WALL).is_none());
    }

    #[test]
    fn test_ramp_height_query() {
        let registry = GeometryRegistry::from_descriptors(&level());
        let h = registry.ramp_height_at(-10.0, 0.0).unwrap();
        assert!((h - 1.0).abs() < 0.0001);
        assert!(registry.ramp_height_at(0.0, 0.0).is_none());
    }

    #[test]
    fn test_elevated_centers() {
        let mut descriptors = level();
        descriptors.push(ShapeDescriptor::Box {
            position: [0.0, 3.0, 20.0],
            size: [4.0, 1.0, 4.0],
        });
        let registry = GeometryRegistry::from_descriptors(&descriptors);
        let elevated: Vec<Vec3> = registry.elevated_centers(1.0).collect();
        assert_eq!(elevated, vec![Vec3::new(0.0, 3.0, 20.0)], "walls are not platforms");
    }

    #[test]
    fn test_shape_lookup_by_key() {
        let mut registry = GeometryRegistry::new();
        let key = registry.insert(StaticShape::new_box(
            Aabb::from_center_size(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0)),
            SurfaceFlags::obstacle(),
        ));
        let shape = registry.get(key).unwrap();
        assert!(shape.as_box().is_some());
        assert!(shape.as_ramp().is_none());
    }
}
