//! # Mesh Errors
//!
//! Error types for brush reconstruction.
//!
//! Only malformed input is an error. Degenerate geometry (faces clipped
//! away, singular plane triples, displacement faces without four corners)
//! is skipped silently by the reconstruction code and never surfaces here.

use config::constants::ConfigError;
use thiserror::Error;

/// Errors that abort a map build.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A side's three points do not define a plane.
    #[error("Malformed side {side_id} in solid {solid_id}: plane is not finite")]
    MalformedSide { solid_id: i64, side_id: i64 },

    /// A displacement block cannot be tessellated.
    #[error("Invalid displacement on side {side_id} in solid {solid_id}: {message}")]
    InvalidDisplacement {
        solid_id: i64,
        side_id: i64,
        message: String,
    },

    /// Too many vertices for 32-bit indices
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },

    /// Invalid geometry configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl MeshError {
    /// Creates a malformed side error.
    pub fn malformed_side(solid_id: i64, side_id: i64) -> Self {
        Self::MalformedSide { solid_id, side_id }
    }

    /// Creates an invalid displacement error.
    pub fn invalid_displacement(solid_id: i64, side_id: i64, message: impl Into<String>) -> Self {
        Self::InvalidDisplacement {
            solid_id,
            side_id,
            message: message.into(),
        }
    }
}

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
