//! Cutting-plane vertex displacement and the one-time floor clamp.

use planetoid_math::Vector3;
use planetoid_mesh::Mesh;
use rand::Rng;
use tracing::{info, trace};

use crate::{CuttingPlane, TerrainError};

/// Which side of the cutting plane grows outward.
///
/// The two conventions are not mirror images of one another once many
/// iterations accumulate, so the choice is explicit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CarveConvention {
    /// Vertices with negative signed distance step outward, positive step
    /// inward.
    #[default]
    OutwardBelow,
    /// Vertices with positive signed distance step outward, negative step
    /// inward.
    OutwardAbove,
}

impl CarveConvention {
    /// Whether a vertex at signed distance `d` (already outside the epsilon
    /// band) moves outward.
    fn is_outward(self, d: f32) -> bool {
        match self {
            CarveConvention::OutwardBelow => d < 0.0,
            CarveConvention::OutwardAbove => d > 0.0,
        }
    }
}

/// Per-iteration carving parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeformParams {
    /// Radial step `k` applied to every vertex off the plane. Absolute, unlike
    /// `offset_range` and the floor, so larger spheres come out smoother
    /// relative to their size.
    pub step: f32,
    /// Vertices with `|d|` at or below this are left untouched.
    pub plane_epsilon: f32,
    /// Plane offsets are drawn from `[-offset_range, offset_range)` times the
    /// mesh's nominal radius.
    pub offset_range: f32,
    /// Sign convention.
    pub convention: CarveConvention,
}

impl Default for DeformParams {
    fn default() -> Self {
        Self {
            step: 0.0004,
            plane_epsilon: 0.0001,
            offset_range: 0.5,
            convention: CarveConvention::default(),
        }
    }
}

impl DeformParams {
    /// Checks every field is in range.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if !(self.step >= 0.0 && self.step.is_finite()) {
            return Err(TerrainError::invalid(
                "step",
                format!("must be non-negative and finite, got {}", self.step),
            ));
        }
        if !(self.plane_epsilon >= 0.0 && self.plane_epsilon.is_finite()) {
            return Err(TerrainError::invalid(
                "plane_epsilon",
                format!("must be non-negative and finite, got {}", self.plane_epsilon),
            ));
        }
        if !(self.offset_range >= 0.0 && self.offset_range.is_finite()) {
            return Err(TerrainError::invalid(
                "offset_range",
                format!("must be non-negative and finite, got {}", self.offset_range),
            ));
        }
        Ok(())
    }
}

/// Floor clamp parameters, both relative to the mesh's nominal radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorParams {
    /// Vertices closer to the center than `ratio·radius` are snapped back.
    pub ratio: f32,
    /// Snapped vertices land in `[ratio, ratio + jitter)·radius`.
    pub jitter: f32,
}

impl Default for FloorParams {
    fn default() -> Self {
        Self {
            ratio: 0.997,
            jitter: 0.001,
        }
    }
}

impl FloorParams {
    /// Checks every field is in range.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if !(self.ratio > 0.0 && self.ratio <= 1.0) {
            return Err(TerrainError::invalid(
                "ratio",
                format!("must be in (0, 1], got {}", self.ratio),
            ));
        }
        if !(self.jitter >= 0.0 && self.jitter.is_finite()) {
            return Err(TerrainError::invalid(
                "jitter",
                format!("must be non-negative and finite, got {}", self.jitter),
            ));
        }
        Ok(())
    }
}

/// Vertex tallies for one carving iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CarveStats {
    /// Vertices stepped away from the center.
    pub outward: usize,
    /// Vertices stepped toward the center.
    pub inward: usize,
    /// Vertices inside the plane's epsilon band.
    pub unchanged: usize,
    /// Inward steps skipped because they would cross the floor.
    pub blocked: usize,
}

/// Applies cutting-plane displacement to a [`Mesh`].
///
/// The random source is passed in per call, so a seeded RNG makes the whole
/// process reproducible.
#[derive(Clone, Debug, Default)]
pub struct TerrainDeformer {
    params: DeformParams,
    floor: FloorParams,
    /// Absolute floor radius, set once the floor clamp has run.
    floor_radius: Option<f32>,
}

impl TerrainDeformer {
    /// Create a deformer after validating both parameter sets.
    pub fn new(params: DeformParams, floor: FloorParams) -> Result<Self, TerrainError> {
        params.validate()?;
        floor.validate()?;
        Ok(Self {
            params,
            floor,
            floor_radius: None,
        })
    }

    /// Carving parameters.
    pub fn params(&self) -> &DeformParams {
        &self.params
    }

    /// Floor radius enforced on inward steps, once the floor clamp has run.
    pub fn floor_radius(&self) -> Option<f32> {
        self.floor_radius
    }

    /// One full-strength carving iteration on a random plane.
    pub fn apply_iteration<R: Rng + ?Sized>(&self, mesh: &mut Mesh, rng: &mut R) -> CarveStats {
        self.apply_scaled(mesh, rng, 1.0)
    }

    /// One carving iteration with the step multiplied by `scale`.
    pub fn apply_scaled<R: Rng + ?Sized>(
        &self,
        mesh: &mut Mesh,
        rng: &mut R,
        scale: f32,
    ) -> CarveStats {
        let plane = CuttingPlane::random(rng, self.params.offset_range * mesh.nominal_radius());
        self.apply_plane(mesh, &plane, scale)
    }

    /// Carve against a specific plane.
    ///
    /// Every vertex farther than `plane_epsilon` from the plane moves exactly
    /// `step·scale` along its own radial direction; which way depends on the
    /// [`CarveConvention`]. A vertex at the origin has no radial direction and
    /// counts as unchanged. The mesh is always marked dirty.
    pub fn apply_plane(&self, mesh: &mut Mesh, plane: &CuttingPlane, scale: f32) -> CarveStats {
        let step = self.params.step * scale;
        let mut stats = CarveStats::default();

        for v in mesh.vertices_mut() {
            let d = plane.signed_distance(*v);
            if d.abs() <= self.params.plane_epsilon {
                stats.unchanged += 1;
                continue;
            }

            // No radial direction at the center.
            let direction = v.normalize();
            if direction == Vector3::ZERO {
                stats.unchanged += 1;
                continue;
            }

            let outward = self.params.convention.is_outward(d);
            let delta = if outward { step } else { -step };
            let moved = *v + direction.scale(delta);

            if !outward
                && let Some(floor) = self.floor_radius
                && moved.length() < floor
            {
                stats.blocked += 1;
                continue;
            }

            *v = moved;
            if outward {
                stats.outward += 1;
            } else {
                stats.inward += 1;
            }
        }

        trace!(
            offset = plane.offset(),
            outward = stats.outward,
            inward = stats.inward,
            unchanged = stats.unchanged,
            blocked = stats.blocked,
            "carved"
        );
        stats
    }

    /// Snap every vertex below the floor back onto a thin shell just above
    /// it, with a small random jitter.
    ///
    /// Runs once per deformer: later calls return 0 without touching the mesh.
    /// From then on [`TerrainDeformer::apply_plane`] refuses inward steps that
    /// would cross the floor. Returns the number of vertices snapped.
    pub fn clamp_to_floor<R: Rng + ?Sized>(&mut self, mesh: &mut Mesh, rng: &mut R) -> usize {
        if self.floor_radius.is_some() {
            return 0;
        }

        let radius = mesh.nominal_radius();
        let floor = self.floor.ratio * radius;
        let jitter = self.floor.jitter * radius;
        let mut snapped = 0;

        for v in mesh.vertices_mut() {
            if v.length() >= floor {
                continue;
            }
            let mut direction = v.normalize();
            if direction == Vector3::ZERO {
                direction = Vector3::Y;
            }
            // The 2-ulp lift keeps rounding from landing a hair under the floor.
            let target = (floor + jitter * rng.random::<f32>()) * (1.0 + 2.0 * f32::EPSILON);
            *v = direction.scale(target);
            snapped += 1;
        }

        self.floor_radius = Some(floor);
        info!(floor, snapped, "floor clamp applied");
        snapped
    }
}
