//! Terrain parameter errors.

/// Errors raised when deformation or growth parameters are out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// A parameter is outside its accepted range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Field name of the offending parameter.
        name: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },
}

impl TerrainError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
