//! Icosphere tessellation: a regular icosahedron refined by repeated 1-to-4
//! triangle subdivision, with every new vertex pushed back onto the sphere.

use planetoid_math::Vector3;
use tracing::debug;

use crate::error::check_radius;
use crate::{Mesh, MeshError, MidpointCache, Triangle};

/// Vertices of the unsubdivided icosahedron.
pub const BASE_VERTEX_COUNT: usize = 12;
/// Faces of the unsubdivided icosahedron.
pub const BASE_TRIANGLE_COUNT: usize = 20;
/// Deepest subdivision whose vertex count (`10·4^n + 2`) still fits in a `u32`
/// index.
pub const MAX_SUBDIVISIONS: u32 = 14;

const ICOSAHEDRON_FACES: [[u32; 3]; BASE_TRIANGLE_COUNT] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Vertex and triangle counts of an icosphere after `subdivisions` passes.
pub fn icosphere_counts(subdivisions: u32) -> (usize, usize) {
    let faces = 4_usize.pow(subdivisions);
    (10 * faces + 2, BASE_TRIANGLE_COUNT * faces)
}

/// Generate an icosphere of the given radius.
///
/// Every vertex lies on the sphere, so each normal is simply the vertex
/// direction and no separate normal pass is needed. Subdivision 5 yields
/// 10 242 vertices and 20 480 triangles.
///
/// # Errors
///
/// [`MeshError::InvalidParameter`] if `radius` is not positive and finite or
/// `subdivisions` exceeds [`MAX_SUBDIVISIONS`].
pub fn icosphere(radius: f32, subdivisions: u32) -> Result<Mesh, MeshError> {
    check_radius(radius)?;
    if subdivisions > MAX_SUBDIVISIONS {
        return Err(MeshError::invalid(
            "subdivisions",
            format!("must be at most {MAX_SUBDIVISIONS}, got {subdivisions}"),
        ));
    }

    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let mut positions: Vec<Vector3> = [
        Vector3::new(-1.0, t, 0.0),
        Vector3::new(1.0, t, 0.0),
        Vector3::new(-1.0, -t, 0.0),
        Vector3::new(1.0, -t, 0.0),
        Vector3::new(0.0, -1.0, t),
        Vector3::new(0.0, 1.0, t),
        Vector3::new(0.0, -1.0, -t),
        Vector3::new(0.0, 1.0, -t),
        Vector3::new(t, 0.0, -1.0),
        Vector3::new(t, 0.0, 1.0),
        Vector3::new(-t, 0.0, -1.0),
        Vector3::new(-t, 0.0, 1.0),
    ]
    .into_iter()
    .map(|p| p.normalize().scale(radius))
    .collect();

    let mut triangles: Vec<Triangle> = ICOSAHEDRON_FACES
        .iter()
        .map(|&[a, b, c]| Triangle::new(a, b, c))
        .collect();

    let (vertex_total, _) = icosphere_counts(subdivisions);
    positions.reserve(vertex_total - positions.len());

    for _ in 0..subdivisions {
        subdivide(&mut positions, &mut triangles, radius);
    }

    let normals: Vec<Vector3> = positions.iter().map(|p| p.normalize()).collect();

    debug!(
        radius,
        subdivisions,
        vertices = positions.len(),
        triangles = triangles.len(),
        "tessellated icosphere"
    );

    Ok(Mesh::from_tessellation(positions, normals, triangles, radius))
}

/// Replace each triangle with 4 by splitting its edges at their midpoints.
///
/// The cache is fresh per pass: it only has to dedupe edges within this pass,
/// since earlier passes already left the vertex set deduplicated.
fn subdivide(positions: &mut Vec<Vector3>, triangles: &mut Vec<Triangle>, radius: f32) {
    // Closed triangle mesh: every edge is shared by exactly two faces.
    let mut cache = MidpointCache::with_capacity(triangles.len() * 3 / 2);
    let mut next = Vec::with_capacity(triangles.len() * 4);

    let mut midpoint = |a: u32, b: u32, positions: &mut Vec<Vector3>| -> u32 {
        cache.get_or_insert_with(a, b, || {
            let mid = positions[a as usize]
                .midpoint(positions[b as usize])
                .normalize()
                .scale(radius);
            let index = positions.len() as u32;
            positions.push(mid);
            index
        })
    };

    for tri in triangles.iter() {
        let Triangle { a, b, c } = *tri;
        let ab = midpoint(a, b, positions);
        let bc = midpoint(b, c, positions);
        let ca = midpoint(c, a, positions);

        next.push(Triangle::new(a, ab, ca));
        next.push(Triangle::new(b, bc, ab));
        next.push(Triangle::new(c, ca, bc));
        next.push(Triangle::new(ab, bc, ca));
    }

    *triangles = next;
}
