use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use bytemuck::{Pod, Zeroable};

/// Lengths below this are treated as zero by [`Vector3::normalize`].
pub const NORMALIZE_EPSILON: f32 = 1e-12;

/// 3D vector value.
///
/// Every operation returns a new value; there are no in-place mutators. The
/// layout is three packed `f32`s so a `&[Vector3]` can be handed to a GPU
/// vertex buffer without copying.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default, Pod, Zeroable)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// Zero vector (0, 0, 0).
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit vector in the X direction.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit vector in the Y direction.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit vector in the Z direction.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Create a new vector with the given components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns the dot product: x₁x₂ + y₁y₂ + z₁z₂
    pub fn dot(self, rhs: Vector3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Returns the cross product self × rhs (right-handed).
    ///
    ///   result.x = self.y * rhs.z - self.z * rhs.y
    ///   result.y = self.z * rhs.x - self.x * rhs.z
    ///   result.z = self.x * rhs.y - self.y * rhs.x
    pub fn cross(self, rhs: Vector3) -> Vector3 {
        Vector3::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Returns x² + y² + z².
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Multiply every component by `factor`.
    pub fn scale(self, factor: f32) -> Vector3 {
        Vector3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Unit vector in the same direction.
    ///
    /// Returns [`Vector3::ZERO`] when the length is below
    /// [`NORMALIZE_EPSILON`]; a degenerate direction is an expected input,
    /// not an error.
    pub fn normalize(self) -> Vector3 {
        let len = self.length();
        if len < NORMALIZE_EPSILON {
            return Vector3::ZERO;
        }
        self.scale(1.0 / len)
    }

    /// Distance between two points.
    pub fn distance(self, rhs: Vector3) -> f32 {
        (self - rhs).length()
    }

    /// Component-wise midpoint of two points.
    pub fn midpoint(self, rhs: Vector3) -> Vector3 {
        (self + rhs).scale(0.5)
    }

    /// Returns `true` if every component is finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Components as an array.
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Self::Output {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Self::Output {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Self::Output {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f32) -> Self::Output {
        self.scale(rhs)
    }
}

impl Div<f32> for Vector3 {
    type Output = Vector3;

    fn div(self, rhs: f32) -> Self::Output {
        Vector3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(v: [f32; 3]) -> Self {
        Vector3::new(v[0], v[1], v[2])
    }
}

impl From<Vector3> for [f32; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl From<glam::Vec3> for Vector3 {
    fn from(v: glam::Vec3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for glam::Vec3 {
    fn from(v: Vector3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}
