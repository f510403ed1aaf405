//! Single entry point over both tessellators.

use crate::{Mesh, MeshError, icosphere, uv_sphere};

/// Which sphere to build, with its parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tessellation {
    /// Latitude/longitude sphere. See [`uv_sphere`].
    UvSphere {
        radius: f32,
        longitude_segments: u32,
        latitude_rings: u32,
    },
    /// Subdivided icosahedron. See [`icosphere`].
    Icosphere { radius: f32, subdivisions: u32 },
}

impl Tessellation {
    /// Radius of the sphere this tessellation builds.
    pub fn radius(&self) -> f32 {
        match *self {
            Tessellation::UvSphere { radius, .. } | Tessellation::Icosphere { radius, .. } => {
                radius
            }
        }
    }
}

/// Build the mesh described by `kind`.
pub fn tessellate(kind: &Tessellation) -> Result<Mesh, MeshError> {
    match *kind {
        Tessellation::UvSphere {
            radius,
            longitude_segments,
            latitude_rings,
        } => uv_sphere(radius, longitude_segments, latitude_rings),
        Tessellation::Icosphere {
            radius,
            subdivisions,
        } => icosphere(radius, subdivisions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatches_uv_sphere() {
        let mesh = tessellate(&Tessellation::UvSphere {
            radius: 2.0,
            longitude_segments: 3,
            latitude_rings: 2,
        })
        .unwrap();
        assert_eq!(mesh.vertex_count(), 10);
        assert_eq!(mesh.nominal_radius(), 2.0);
    }

    #[test]
    fn test_dispatches_icosphere() {
        let kind = Tessellation::Icosphere {
            radius: 1.0,
            subdivisions: 1,
        };
        let mesh = tessellate(&kind).unwrap();
        assert_eq!(mesh.vertex_count(), 42);
        assert_eq!(kind.radius(), 1.0);
    }

    #[test]
    fn test_propagates_invalid_parameter() {
        let result = tessellate(&Tessellation::UvSphere {
            radius: 1.0,
            longitude_segments: 1,
            latitude_rings: 2,
        });
        assert!(matches!(result, Err(MeshError::InvalidParameter { .. })));
    }
}
