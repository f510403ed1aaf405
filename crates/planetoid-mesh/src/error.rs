//! Mesh construction errors.

/// Errors raised while building a [`crate::Mesh`].
///
/// Numerical edge cases (zero-length normals, degenerate triangles) are not
/// errors; they resolve to documented fallback values instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// A tessellation argument is outside its accepted range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the tessellator signature.
        name: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },

    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
}

impl MeshError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Rejects radii that are not strictly positive and finite.
pub(crate) fn check_radius(radius: f32) -> Result<(), MeshError> {
    if radius > 0.0 && radius.is_finite() {
        Ok(())
    } else {
        Err(MeshError::invalid(
            "radius",
            format!("must be positive and finite, got {radius}"),
        ))
    }
}
