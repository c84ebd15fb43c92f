//! 3D Vector type

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 3D vector in a right-handed, Y-up world.
///
/// Yaw 0 faces -Z, and positive yaw turns toward -X (counter-clockwise seen
/// from above).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0 };
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Unit forward direction on the ground plane for a camera yaw
    #[inline]
    pub fn forward_from_yaw(yaw: f32) -> Self {
        Self::new(-yaw.sin(), 0.0, -yaw.cos())
    }

    /// Unit right direction on the ground plane for a camera yaw
    #[inline]
    pub fn right_from_yaw(yaw: f32) -> Self {
        Self::new(yaw.cos(), 0.0, -yaw.sin())
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Length squared (faster than length)
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Normalize to unit length, or zero for a zero-length vector
    #[inline]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            self * (1.0 / len)
        } else {
            Self::ZERO
        }
    }

    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// The same vector with its vertical component zeroed
    #[inline]
    pub fn horizontal(self) -> Self {
        Self::new(self.x, 0.0, self.z)
    }

    /// Length of the XZ projection
    #[inline]
    pub fn horizontal_length(self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    /// Rotate about the Y axis by `angle` radians
    ///
    /// Uses the same convention as yaw: `x' = x cos + z sin`, `z' = -x sin + z cos`.
    #[inline]
    pub fn rotate_y(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            self.x * cos + self.z * sin,
            self.y,
            -self.x * sin + self.z * cos,
        )
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Linear interpolation between two vectors
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }

    /// Component-wise minimum
    #[inline]
    pub fn min_components(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum
    #[inline]
    pub fn max_components(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Whether every component is finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Vec3 {
    #[inline]
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f32; 3] {
    #[inline]
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

// Operator overloads

impl std::ops::Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl std::ops::MulAssign<f32> for Vec3 {
    #[inline]
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
        self.z *= scalar;
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl std::ops::Div<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 0.0001;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_dot_and_cross() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_normalized_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
        let n = Vec3::new(0.0, 0.0, -4.0).normalized();
        assert!(approx(n, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_yaw_basis_at_zero() {
        assert!(approx(Vec3::forward_from_yaw(0.0), Vec3::new(0.0, 0.0, -1.0)));
        assert!(approx(Vec3::right_from_yaw(0.0), Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_yaw_basis_is_orthonormal() {
        for i in 0..16 {
            let yaw = i as f32 * 0.4 - 3.0;
            let f = Vec3::forward_from_yaw(yaw);
            let r = Vec3::right_from_yaw(yaw);
            assert!((f.length() - 1.0).abs() < EPSILON);
            assert!((r.length() - 1.0).abs() < EPSILON);
            assert!(f.dot(r).abs() < EPSILON, "forward and right must be perpendicular");
            // Right-handed with Y up: right x forward points up
            assert!(r.cross(f).y > 0.0);
        }
    }

    #[test]
    fn test_rotate_y_matches_yaw_basis() {
        let yaw = 0.7;
        let rotated = Vec3::new(0.0, 0.0, -1.0).rotate_y(yaw);
        assert!(approx(rotated, Vec3::forward_from_yaw(yaw)));
    }

    #[test]
    fn test_rotate_y_half_turn() {
        let v = Vec3::new(1.0, 2.0, 3.0).rotate_y(PI);
        assert!(approx(v, Vec3::new(-1.0, 2.0, -3.0)));
        let q = Vec3::X.rotate_y(FRAC_PI_2);
        assert!(approx(q, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_horizontal() {
        let v = Vec3::new(3.0, 9.0, 4.0);
        assert_eq!(v.horizontal(), Vec3::new(3.0, 0.0, 4.0));
        assert_eq!(v.horizontal_length(), 5.0);
    }

    #[test]
    fn test_operators() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(5.0, 6.0, 7.0);
        assert_eq!(a + b, Vec3::new(6.0, 8.0, 10.0));
        assert_eq!(b - a, Vec3::new(4.0, 4.0, 4.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(b / 2.0, Vec3::new(2.5, 3.0, 3.5));
    }

    #[test]
    fn test_array_conversion() {
        let v: Vec3 = [1.0, 2.0, 3.0].into();
        let back: [f32; 3] = v.into();
        assert_eq!(back, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_min_max_lerp() {
        let a = Vec3::new(1.0, 5.0, 2.0);
        let b = Vec3::new(3.0, 2.0, 4.0);
        assert_eq!(a.min_components(b), Vec3::new(1.0, 2.0, 2.0));
        assert_eq!(a.max_components(b), Vec3::new(3.0, 5.0, 4.0));
        assert_eq!(a.lerp(b, 0.5), Vec3::new(2.0, 3.5, 3.0));
    }
}
