//! Indexed triangle mesh with positionally paired normals and a dirty flag.

use bytemuck::{Pod, Zeroable};
use planetoid_math::Vector3;

use crate::MeshError;
use crate::error::check_radius;

/// Three vertex indices, wound counter-clockwise when seen from outside the
/// mesh so that `(b - a) × (c - a)` points outward.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Triangle {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Triangle {
    /// Create a new triangle from three vertex indices.
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    /// Indices in winding order.
    pub fn indices(self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }

    /// The three directed edges `(a,b)`, `(b,c)`, `(c,a)`.
    pub fn edges(self) -> [(u32, u32); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }
}

/// A triangulated sphere-like mesh.
///
/// `normals[i]` belongs to `vertices[i]`; the two arrays always have the same
/// length. The vertex count is fixed after construction, so triangle indices
/// stay valid for the mesh's whole lifetime.
///
/// The `dirty` flag is raised by every vertex mutation and cleared only by the
/// consumer once it has recomputed normals and re-uploaded buffers (see
/// [`crate::sync_mesh`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub(crate) vertices: Vec<Vector3>,
    pub(crate) normals: Vec<Vector3>,
    pub(crate) triangles: Vec<Triangle>,
    pub(crate) nominal_radius: f32,
    pub(crate) dirty: bool,
}

impl Mesh {
    /// Build a mesh from raw parts.
    ///
    /// Normals start as zero vectors and the mesh starts dirty; call
    /// [`crate::compute_normals`] before reading normals. The radius must be
    /// positive and finite, and so must every vertex component.
    pub fn from_parts(
        vertices: Vec<Vector3>,
        triangles: Vec<Triangle>,
        nominal_radius: f32,
    ) -> Result<Self, MeshError> {
        check_radius(nominal_radius)?;
        if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(MeshError::invalid(
                "vertices",
                format!("vertex {index} is not finite: {}", vertices[index]),
            ));
        }

        let vertex_count = vertices.len();
        for (triangle, tri) in triangles.iter().enumerate() {
            if let Some(&index) = tri
                .indices()
                .iter()
                .find(|&&index| index as usize >= vertex_count)
            {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }

        Ok(Self {
            normals: vec![Vector3::ZERO; vertex_count],
            vertices,
            triangles,
            nominal_radius,
            dirty: true,
        })
    }

    /// Constructor for tessellators, which guarantee valid indices.
    pub(crate) fn from_tessellation(
        vertices: Vec<Vector3>,
        normals: Vec<Vector3>,
        triangles: Vec<Triangle>,
        nominal_radius: f32,
    ) -> Self {
        debug_assert_eq!(vertices.len(), normals.len());
        Self {
            vertices,
            normals,
            triangles,
            nominal_radius,
            dirty: true,
        }
    }

    /// Vertex positions.
    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    /// Mutable vertex positions. Raises the dirty flag.
    ///
    /// Returns a slice, so the vertex count cannot change.
    pub fn vertices_mut(&mut self) -> &mut [Vector3] {
        self.dirty = true;
        &mut self.vertices
    }

    /// Per-vertex normals, paired with [`Mesh::vertices`] by index.
    pub fn normals(&self) -> &[Vector3] {
        &self.normals
    }

    /// Triangle index triples.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Radius the mesh was tessellated at.
    pub fn nominal_radius(&self) -> f32 {
        self.nominal_radius
    }

    /// Returns `true` if vertices changed since the last sync.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag the mesh as needing a normal recompute and re-upload.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clear the dirty flag. Only the consumer that has just re-synced should
    /// call this.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Smallest and largest vertex distance from the origin, or `None` for an
    /// empty mesh.
    pub fn radius_range(&self) -> Option<(f32, f32)> {
        self.vertices.iter().map(|v| v.length()).fold(None, |acc, r| {
            Some(match acc {
                None => (r, r),
                Some((lo, hi)) => (lo.min(r), hi.max(r)),
            })
        })
    }
}
