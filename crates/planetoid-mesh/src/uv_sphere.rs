//! Latitude/longitude sphere tessellation.

use std::f32::consts::{PI, TAU};

use planetoid_math::Vector3;
use tracing::debug;

use crate::error::check_radius;
use crate::{Mesh, MeshError, Triangle};

/// Fewest longitude segments that still enclose a volume.
pub const MIN_LONGITUDE_SEGMENTS: u32 = 3;
/// Fewest latitude rings (poles excluded).
pub const MIN_LATITUDE_RINGS: u32 = 1;

/// Vertex and triangle counts of a UV sphere.
///
/// Each ring carries `n_long + 1` vertices because the seam column is
/// duplicated.
pub fn uv_sphere_counts(n_long: u32, n_lat: u32) -> (u64, u64) {
    let (n_long, n_lat) = (u64::from(n_long), u64::from(n_lat));
    let vertices = (n_long + 1).saturating_mul(n_lat).saturating_add(2);
    let triangles =
        (2 * n_long).saturating_add((2 * n_long).saturating_mul(n_lat.saturating_sub(1)));
    (vertices, triangles)
}

/// Generate a UV sphere: a north pole, `n_lat` rings of `n_long + 1`
/// vertices, and a south pole.
///
/// Ring `lat` sits at polar angle `π·(lat+1)/(n_lat+1)` measured from +Y;
/// column `lon` at azimuth `2π·lon/n_long`. The last column of every ring
/// repeats the first column's position exactly so a renderer can give the
/// seam distinct texture coordinates.
///
/// # Errors
///
/// [`MeshError::InvalidParameter`] if `radius` is not positive and finite,
/// `n_long < 3`, `n_lat < 1`, or the vertex count overflows a `u32` index.
pub fn uv_sphere(radius: f32, n_long: u32, n_lat: u32) -> Result<Mesh, MeshError> {
    check_radius(radius)?;
    if n_long < MIN_LONGITUDE_SEGMENTS {
        return Err(MeshError::invalid(
            "n_long",
            format!("must be at least {MIN_LONGITUDE_SEGMENTS}, got {n_long}"),
        ));
    }
    if n_lat < MIN_LATITUDE_RINGS {
        return Err(MeshError::invalid(
            "n_lat",
            format!("must be at least {MIN_LATITUDE_RINGS}, got {n_lat}"),
        ));
    }
    let (vertex_total, triangle_total) = uv_sphere_counts(n_long, n_lat);
    if vertex_total > u64::from(u32::MAX) {
        return Err(MeshError::invalid(
            "n_long",
            format!("{n_long}x{n_lat} needs {vertex_total} vertices, more than a u32 index holds"),
        ));
    }

    let mut vertices = Vec::with_capacity(vertex_total as usize);
    vertices.push(Vector3::new(0.0, radius, 0.0));
    for lat in 0..n_lat {
        let polar = PI * (lat + 1) as f32 / (n_lat + 1) as f32;
        let (sin_polar, cos_polar) = polar.sin_cos();

        for lon in 0..=n_long {
            let column = if lon == n_long { 0 } else { lon };
            let azimuth = TAU * column as f32 / n_long as f32;
            let (sin_azimuth, cos_azimuth) = azimuth.sin_cos();

            vertices.push(
                Vector3::new(sin_polar * cos_azimuth, cos_polar, sin_polar * sin_azimuth)
                    .scale(radius),
            );
        }
    }
    vertices.push(Vector3::new(0.0, -radius, 0.0));

    let last = (vertices.len() - 1) as u32;
    let ring = n_long + 1;
    let mut triangles = Vec::with_capacity(triangle_total as usize);

    // North cap.
    for lon in 0..n_long {
        triangles.push(Triangle::new(lon + 2, lon + 1, 0));
    }

    // Bands between consecutive rings.
    for lat in 0..n_lat - 1 {
        for lon in 0..n_long {
            let current = lon + lat * ring + 1;
            let next = current + ring;

            triangles.push(Triangle::new(current, current + 1, next + 1));
            triangles.push(Triangle::new(current, next + 1, next));
        }
    }

    // South cap.
    for lon in 0..n_long {
        triangles.push(Triangle::new(last, last - (lon + 2), last - (lon + 1)));
    }

    let normals = vertices.iter().map(|v| v.normalize()).collect();

    debug!(
        radius,
        n_long,
        n_lat,
        vertices = vertices.len(),
        triangles = triangles.len(),
        "tessellated uv sphere"
    );

    Ok(Mesh::from_tessellation(vertices, normals, triangles, radius))
}
