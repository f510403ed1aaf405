//! Flat GPU-ready views of a [`Mesh`] and the dirty-flag sync contract.

use planetoid_math::Vector3;
use tracing::trace;

use crate::{Mesh, compute_normals};

impl Mesh {
    /// Vertex positions as `x, y, z` floats, three per vertex.
    pub fn position_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Vertex normals as `x, y, z` floats, three per vertex.
    pub fn normal_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Triangle indices, three per triangle.
    pub fn index_data(&self) -> &[u32] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// Position buffer as raw bytes for GPU upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Normal buffer as raw bytes for GPU upload.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Index buffer as raw bytes for GPU upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// All three flat views at once.
    pub fn buffers(&self) -> MeshBuffers<'_> {
        MeshBuffers {
            positions: self.position_data(),
            normals: self.normal_data(),
            indices: self.index_data(),
        }
    }
}

/// Borrowed flat arrays handed to a [`MeshSink`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshBuffers<'a> {
    pub positions: &'a [f32],
    pub normals: &'a [f32],
    pub indices: &'a [u32],
}

/// Non-indexed triangle soup: three vertices per triangle, positions and
/// normals copied out in winding order. Suits `draw(0..vertex_count)` style
/// rendering without an index buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpandedBuffers {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
}

impl ExpandedBuffers {
    /// Number of emitted vertices (three per triangle).
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Position buffer as raw bytes.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normal buffer as raw bytes.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }
}

/// Expand an indexed mesh into a [`ExpandedBuffers`] triangle soup.
pub fn expand_triangles(mesh: &Mesh) -> ExpandedBuffers {
    let floats = mesh.triangles.len() * 9;
    let mut out = ExpandedBuffers {
        positions: Vec::with_capacity(floats),
        normals: Vec::with_capacity(floats),
    };

    for tri in &mesh.triangles {
        for index in tri.indices() {
            let i = index as usize;
            out.positions.extend_from_slice(&mesh.vertices[i].to_array());
            let normal = mesh.normals.get(i).copied().unwrap_or(Vector3::ZERO);
            out.normals.extend_from_slice(&normal.to_array());
        }
    }

    out
}

/// Receives re-synced mesh data, typically by writing it into GPU buffers.
pub trait MeshSink {
    /// Replace the sink's copy of the mesh with `buffers`.
    fn upload(&mut self, buffers: MeshBuffers<'_>);
}

/// Bring `sink` up to date with `mesh` if and only if the mesh is dirty.
///
/// Recomputes normals, uploads, then clears the dirty flag, so each change is
/// uploaded at most once. Returns whether an upload happened.
pub fn sync_mesh<S: MeshSink + ?Sized>(mesh: &mut Mesh, sink: &mut S) -> bool {
    if !mesh.is_dirty() {
        return false;
    }

    compute_normals(mesh);
    sink.upload(mesh.buffers());
    mesh.clear_dirty();

    trace!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "mesh synced"
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Triangle, icosphere, uv_sphere};

    #[derive(Default)]
    struct RecordingSink {
        uploads: usize,
        positions: Vec<f32>,
        normals: Vec<f32>,
        indices: Vec<u32>,
    }

    impl MeshSink for RecordingSink {
        fn upload(&mut self, buffers: MeshBuffers<'_>) {
            self.uploads += 1;
            self.positions = buffers.positions.to_vec();
            self.normals = buffers.normals.to_vec();
            self.indices = buffers.indices.to_vec();
        }
    }

    #[test]
    fn test_flat_views_have_expected_lengths() {
        let mesh = icosphere(1.0, 2).unwrap();
        assert_eq!(mesh.position_data().len(), mesh.vertex_count() * 3);
        assert_eq!(mesh.normal_data().len(), mesh.vertex_count() * 3);
        assert_eq!(mesh.index_data().len(), mesh.triangle_count() * 3);
        assert_eq!(mesh.position_bytes().len(), mesh.vertex_count() * 12);
        assert_eq!(mesh.index_bytes().len(), mesh.triangle_count() * 12);
        assert_eq!(mesh.normal_bytes().len(), mesh.vertex_count() * 12);
    }

    #[test]
    fn test_flat_views_preserve_order() {
        let mesh = uv_sphere(2.0, 3, 2).unwrap();
        assert_eq!(&mesh.position_data()[..3], &[0.0, 2.0, 0.0]);
        assert_eq!(&mesh.index_data()[..3], &[2, 1, 0]);
    }

    #[test]
    fn test_expand_triangles() {
        let mut mesh = Mesh::from_parts(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
                Vector3::new(1.0, 1.0, 0.0),
            ],
            vec![Triangle::new(0, 1, 2), Triangle::new(1, 3, 2)],
            1.0,
        )
        .unwrap();
        compute_normals(&mut mesh);

        let soup = expand_triangles(&mesh);
        assert_eq!(soup.vertex_count(), 6);
        assert_eq!(
            &soup.positions[9..18],
            &[1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert!(soup.normals.chunks(3).all(|n| n == [0.0, 0.0, 1.0]));
        assert_eq!(soup.position_bytes().len(), 6 * 12);
        assert_eq!(soup.normal_bytes().len(), 6 * 12);
    }

    #[test]
    fn test_sync_uploads_once_per_change() {
        let mut mesh = icosphere(1.0, 1).unwrap();
        let mut sink = RecordingSink::default();

        assert!(sync_mesh(&mut mesh, &mut sink));
        assert!(!mesh.is_dirty());
        assert!(!sync_mesh(&mut mesh, &mut sink));
        assert_eq!(sink.uploads, 1);

        mesh.vertices_mut()[0] = Vector3::new(0.0, 2.0, 0.0);
        assert!(sync_mesh(&mut mesh, &mut sink));
        assert_eq!(sink.uploads, 2);
        assert_eq!(&sink.positions[..3], &[0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_sync_uploads_fresh_normals() {
        let mut mesh = uv_sphere(1.0, 12, 6).unwrap();
        for v in mesh.vertices_mut() {
            *v = Vector3::new(v.x * 2.0, v.y, v.z);
        }

        let mut sink = RecordingSink::default();
        sync_mesh(&mut mesh, &mut sink);

        let mut expected = mesh.clone();
        compute_normals(&mut expected);
        assert_eq!(sink.normals, expected.normal_data());
        assert_eq!(sink.indices, mesh.index_data());
    }
}
