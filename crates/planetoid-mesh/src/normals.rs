//! Smoothed per-vertex normals from triangle topology.

use planetoid_math::Vector3;

use crate::Mesh;

/// Unnormalized face normal `(b - a) × (c - a)`.
///
/// Points outward for counter-clockwise winding seen from outside. Its
/// length is twice the triangle's area, which is what gives larger faces more
/// weight when several are summed at a shared vertex.
#[inline]
pub fn face_normal(a: Vector3, b: Vector3, c: Vector3) -> Vector3 {
    (b - a).cross(c - a)
}

/// Recompute `mesh.normals` as the area-weighted average of incident face
/// normals.
///
/// Accumulators are rebuilt from zero on every call, so calling this twice on
/// an unchanged mesh yields bit-identical normals. A vertex whose summed face
/// normals are (near) zero, such as one no triangle references, keeps the
/// zero vector.
///
/// Does not clear the dirty flag; that belongs to whoever uploads the result.
pub fn compute_normals(mesh: &mut Mesh) {
    let mut accum = vec![Vector3::ZERO; mesh.vertices.len()];

    for tri in &mesh.triangles {
        let [ia, ib, ic] = tri.indices().map(|i| i as usize);
        let n = face_normal(mesh.vertices[ia], mesh.vertices[ib], mesh.vertices[ic]);

        accum[ia] = accum[ia] + n;
        accum[ib] = accum[ib] + n;
        accum[ic] = accum[ic] + n;
    }

    mesh.normals.clear();
    mesh.normals.extend(accum.into_iter().map(Vector3::normalize));
}
