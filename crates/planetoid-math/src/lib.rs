//! Immutable `f32` vector value type shared by the tessellators, the normal
//! computer and the terrain deformer.

mod vector;

pub use vector::{NORMALIZE_EPSILON, Vector3};
