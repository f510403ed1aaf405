//! Random cutting planes.

use planetoid_math::Vector3;
use rand::Rng;

/// Candidate directions shorter than this are redrawn instead of normalized.
pub const MIN_DIRECTION_LENGTH: f32 = 1e-4;

/// Draw a uniformly random unit direction.
///
/// Components are drawn independently from `[-0.5, 0.5)` and the result is
/// normalized; near-zero draws are rejected and redrawn.
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vector3 {
    loop {
        let candidate = Vector3::new(
            rng.random::<f32>() - 0.5,
            rng.random::<f32>() - 0.5,
            rng.random::<f32>() - 0.5,
        );
        if candidate.length() >= MIN_DIRECTION_LENGTH {
            return candidate.normalize();
        }
    }
}

/// An oriented plane: the set of points `p` with `(p - offset·normal)·normal = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CuttingPlane {
    normal: Vector3,
    offset: f32,
}

impl CuttingPlane {
    /// Plane with the given normal passing through `offset·normal`.
    ///
    /// The normal is normalized; returns `None` if it is too short to define
    /// a direction.
    pub fn new(normal: Vector3, offset: f32) -> Option<Self> {
        if normal.length() < MIN_DIRECTION_LENGTH {
            return None;
        }
        Some(Self {
            normal: normal.normalize(),
            offset,
        })
    }

    /// Random plane: random unit normal, offset uniform in
    /// `[-offset_range, offset_range)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, offset_range: f32) -> Self {
        let normal = random_direction(rng);
        let offset = (rng.random::<f32>() - 0.5) * 2.0 * offset_range;
        Self { normal, offset }
    }

    /// Unit normal.
    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// Signed distance of the plane from the origin along its normal.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// The point `offset·normal` on the plane.
    pub fn point(&self) -> Vector3 {
        self.normal.scale(self.offset)
    }

    /// Signed distance of `v` from the plane; positive on the side the normal
    /// points to.
    pub fn signed_distance(&self, v: Vector3) -> f32 {
        (v - self.point()).dot(self.normal)
    }
}
