//! Decaying-amplitude growth schedule driven one tick at a time.

use planetoid_mesh::Mesh;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::{DeformParams, FloorParams, TerrainDeformer, TerrainError};

/// Parameters for a full growth run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthParams {
    /// Carving iterations before the floor clamp runs.
    pub iterations: u32,
    /// Iterations batched into one [`GrowthSchedule::tick`].
    pub iterations_per_tick: u32,
    /// Displacement scale of the first iteration.
    pub initial_scale: f32,
    /// Multiplier applied to the scale after every iteration.
    pub decay: f32,
    /// Carving stops once the scale falls below this.
    pub min_scale: f32,
    /// Per-iteration carving parameters.
    pub deform: DeformParams,
    /// Floor clamp parameters.
    pub floor: FloorParams,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            iterations_per_tick: 5,
            initial_scale: 1.0,
            decay: 0.9995,
            min_scale: 0.01,
            deform: DeformParams::default(),
            floor: FloorParams::default(),
        }
    }
}

impl GrowthParams {
    /// Checks every field is in range.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.iterations_per_tick == 0 {
            return Err(TerrainError::invalid(
                "iterations_per_tick",
                "must be at least 1",
            ));
        }
        if !(self.initial_scale >= 0.0 && self.initial_scale.is_finite()) {
            return Err(TerrainError::invalid(
                "initial_scale",
                format!("must be non-negative and finite, got {}", self.initial_scale),
            ));
        }
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(TerrainError::invalid(
                "decay",
                format!("must be in (0, 1], got {}", self.decay),
            ));
        }
        if !(self.min_scale >= 0.0 && self.min_scale.is_finite()) {
            return Err(TerrainError::invalid(
                "min_scale",
                format!("must be non-negative and finite, got {}", self.min_scale),
            ));
        }
        self.deform.validate()?;
        self.floor.validate()
    }
}

/// Where a [`GrowthSchedule`] is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthPhase {
    /// Carving with a shrinking step.
    Growing,
    /// The step fell below `min_scale`; waiting for the counter to expire.
    Exhausted,
    /// The floor clamp has run; the schedule no longer touches the mesh.
    Settled,
}

/// Runs a [`TerrainDeformer`] over many ticks with a decaying step, then
/// applies the floor clamp exactly once when the iteration counter expires.
///
/// Iterations are strictly ordered: each sees the mesh left by the previous
/// one, and the seeded RNG makes a run reproducible.
#[derive(Clone, Debug)]
pub struct GrowthSchedule {
    deformer: TerrainDeformer,
    rng: ChaCha8Rng,
    params: GrowthParams,
    remaining: u32,
    scale: f32,
    phase: GrowthPhase,
}

impl GrowthSchedule {
    /// Create a schedule seeded from `seed`.
    pub fn new(params: GrowthParams, seed: u64) -> Result<Self, TerrainError> {
        Self::with_rng(params, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create a schedule drawing from an existing RNG.
    pub fn with_rng(params: GrowthParams, rng: ChaCha8Rng) -> Result<Self, TerrainError> {
        params.validate()?;
        Ok(Self {
            deformer: TerrainDeformer::new(params.deform, params.floor)?,
            rng,
            params,
            remaining: params.iterations,
            scale: params.initial_scale,
            phase: GrowthPhase::Growing,
        })
    }

    /// Current phase.
    pub fn phase(&self) -> GrowthPhase {
        self.phase
    }

    /// Returns `true` once the floor clamp has run.
    pub fn is_settled(&self) -> bool {
        self.phase == GrowthPhase::Settled
    }

    /// Scale the next carving iteration will use.
    pub fn displacement_scale(&self) -> f32 {
        self.scale
    }

    /// Iterations left before the floor clamp.
    pub fn remaining_iterations(&self) -> u32 {
        self.remaining
    }

    /// The underlying deformer.
    pub fn deformer(&self) -> &TerrainDeformer {
        &self.deformer
    }

    /// Advance by one iteration.
    pub fn step(&mut self, mesh: &mut Mesh) -> GrowthPhase {
        if self.phase == GrowthPhase::Settled {
            return self.phase;
        }

        if self.remaining == 0 {
            let snapped = self.deformer.clamp_to_floor(mesh, &mut self.rng);
            self.phase = GrowthPhase::Settled;
            info!(snapped, "growth settled");
            return self.phase;
        }
        self.remaining -= 1;

        if self.scale < self.params.min_scale {
            if self.phase == GrowthPhase::Growing {
                self.phase = GrowthPhase::Exhausted;
                info!(
                    scale = self.scale,
                    remaining = self.remaining,
                    "displacement scale exhausted"
                );
            }
            return self.phase;
        }

        self.deformer.apply_scaled(mesh, &mut self.rng, self.scale);
        self.scale *= self.params.decay;
        self.phase
    }

    /// Advance by one tick: `iterations_per_tick` iterations in order.
    pub fn tick(&mut self, mesh: &mut Mesh) -> GrowthPhase {
        for _ in 0..self.params.iterations_per_tick {
            if self.step(mesh) == GrowthPhase::Settled {
                break;
            }
        }
        debug!(
            scale = self.scale,
            remaining = self.remaining,
            phase = ?self.phase,
            "growth tick"
        );
        self.phase
    }
}
