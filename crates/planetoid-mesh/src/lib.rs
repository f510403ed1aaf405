//! Sphere tessellation, watertight icosphere subdivision, vertex normal
//! reconstruction and GPU-ready buffer views.

mod buffers;
mod error;
mod icosphere;
mod mesh;
mod midpoint;
mod normals;
mod tessellate;
mod uv_sphere;

pub use buffers::{ExpandedBuffers, MeshBuffers, MeshSink, expand_triangles, sync_mesh};
pub use error::MeshError;
pub use icosphere::{
    BASE_TRIANGLE_COUNT, BASE_VERTEX_COUNT, MAX_SUBDIVISIONS, icosphere, icosphere_counts,
};
pub use mesh::{Mesh, Triangle};
pub use midpoint::{MidpointCache, edge_key};
pub use normals::{compute_normals, face_normal};
pub use tessellate::{Tessellation, tessellate};
pub use uv_sphere::{MIN_LATITUDE_RINGS, MIN_LONGITUDE_SEGMENTS, uv_sphere, uv_sphere_counts};
