//! Terrain growth by repeated random half-space carving.
//!
//! Each iteration picks a random plane and nudges every vertex one small
//! radial step, outward on one side of the plane and inward on the other.
//! Thousands of iterations produce an organic, asteroid-like surface.
//! [`GrowthSchedule`] layers a decaying step size and a one-time floor clamp
//! on top of the raw [`TerrainDeformer`].

mod deformer;
mod error;
mod growth;
mod plane;

pub use deformer::{CarveConvention, CarveStats, DeformParams, FloorParams, TerrainDeformer};
pub use error::TerrainError;
pub use growth::{GrowthParams, GrowthPhase, GrowthSchedule};
pub use plane::{CuttingPlane, MIN_DIRECTION_LENGTH, random_direction};
