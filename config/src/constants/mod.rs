//! Centralized configuration values shared across the brush mesh workspace.
//!
//! Each public item in this module documents its purpose and, where it helps,
//! a minimal usage example so that downstream crates can remain declarative
//! and avoid scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Tolerance for plane-side classification.
///
/// A point whose signed distance to a plane lies within `±CLIP_EPSILON` is
/// considered to be on the plane. The same value gates the parallel-plane
/// test (`|n1 · n2| > 1 - CLIP_EPSILON`), the singular determinant test of
/// plane triple intersection and the hull membership test.
///
/// # Examples
/// ```
/// use config::constants::CLIP_EPSILON;
/// assert_eq!(CLIP_EPSILON, 1.0 / 512.0);
/// ```
pub const CLIP_EPSILON: f64 = 1.0 / 512.0;

/// Number of snapping steps per world unit.
///
/// Reconstructed face vertices are rounded to the nearest multiple of
/// `1 / SNAP_RESOLUTION`, and displacement smoothing keys are quantized by
/// flooring `coordinate * SNAP_RESOLUTION`.
///
/// # Examples
/// ```
/// use config::constants::SNAP_RESOLUTION;
/// let step = 1.0 / SNAP_RESOLUTION;
/// assert_eq!(step, 0.0078125);
/// ```
pub const SNAP_RESOLUTION: f64 = 128.0;

// =============================================================================
// WORLD CONSTANTS
// =============================================================================

/// Extent of the largest supported map along any axis.
pub const MAX_MAP_SIZE: f64 = 65536.0;

/// Side length of the seed square every face starts from before clipping.
///
/// Half of the map size is enough for the square to cover every brush face
/// that fits inside the map bounds.
///
/// # Examples
/// ```
/// use config::constants::{BASE_WINDING_SIZE, MAX_MAP_SIZE};
/// assert!(BASE_WINDING_SIZE < MAX_MAP_SIZE);
/// ```
pub const BASE_WINDING_SIZE: f64 = MAX_MAP_SIZE / 2.0;

/// Brushes with this many sides or more do not record candidate points in
/// the trace when reconstructed by triple intersection.
pub const TRACE_SIDE_LIMIT: usize = 64;

/// Case-insensitive material substring marking a side that is never drawn.
///
/// # Examples
/// ```
/// use config::constants::NODRAW_MATERIAL_PATTERN;
/// assert!("TOOLS/TOOLSCLIP".to_lowercase().contains(NODRAW_MATERIAL_PATTERN));
/// ```
pub const NODRAW_MATERIAL_PATTERN: &str = "tools/";

/// Material assumed for a side that does not declare one.
pub const DEFAULT_MATERIAL: &str = "tools/nodraw";

/// Largest accepted displacement subdivision power.
///
/// A displacement of power `P` is a `(2^P + 1) x (2^P + 1)` vertex grid.
///
/// # Examples
/// ```
/// use config::constants::MAX_DISPLACEMENT_POWER;
/// let side = (1usize << MAX_DISPLACEMENT_POWER) + 1;
/// assert_eq!(side, 17);
/// ```
pub const MAX_DISPLACEMENT_POWER: u32 = 4;

// =============================================================================
// BUFFER LAYOUT
// =============================================================================

/// Interleaved floats per packed vertex: position (3) followed by normal (3).
pub const FLOATS_PER_VERTEX: usize = 6;

/// Bytes occupied by one packed triangle (three `f32` vertices).
///
/// # Examples
/// ```
/// use config::constants::{BYTES_PER_TRIANGLE, FLOATS_PER_VERTEX};
/// assert_eq!(BYTES_PER_TRIANGLE, 3 * FLOATS_PER_VERTEX * 4);
/// ```
pub const BYTES_PER_TRIANGLE: usize = 3 * FLOATS_PER_VERTEX * std::mem::size_of::<f32>();

// =============================================================================
// GEOMETRY CONFIG
// =============================================================================

/// Immutable snapshot of the tolerances used by one reconstruction run.
///
/// # Examples
/// ```
/// use config::constants::GeometryConfig;
/// let config = GeometryConfig::default();
/// assert!(config.epsilon > 0.0);
/// assert_eq!(config.snap_resolution, 128.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryConfig {
    /// Plane-side classification tolerance.
    pub epsilon: f64,
    /// Snapping steps per world unit.
    pub snap_resolution: f64,
    /// Side length of the seed square used by successive clipping.
    pub base_winding_size: f64,
    /// Side count at which candidate-point tracing is suppressed.
    pub trace_side_limit: usize,
}

impl GeometryConfig {
    /// Builds a configuration, rejecting tolerances that would make the
    /// classification or snapping meaningless.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GeometryConfig;
    /// let cfg = GeometryConfig::new(1.0e-3, 64.0, 8192.0, 32).expect("valid config");
    /// assert_eq!(cfg.trace_side_limit, 32);
    /// ```
    pub fn new(
        epsilon: f64,
        snap_resolution: f64,
        base_winding_size: f64,
        trace_side_limit: usize,
    ) -> Result<Self, ConfigError> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ConfigError::InvalidEpsilon(epsilon));
        }
        if !snap_resolution.is_finite() || snap_resolution <= 0.0 {
            return Err(ConfigError::InvalidSnapResolution(snap_resolution));
        }
        if !base_winding_size.is_finite() || base_winding_size <= 0.0 {
            return Err(ConfigError::InvalidWindingSize(base_winding_size));
        }
        Ok(Self {
            epsilon,
            snap_resolution,
            base_winding_size,
            trace_side_limit,
        })
    }

    /// Re-checks a configuration whose fields were set directly.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GeometryConfig;
    /// let mut cfg = GeometryConfig::default();
    /// cfg.epsilon = -1.0;
    /// assert!(cfg.validated().is_err());
    /// ```
    pub fn validated(self) -> Result<Self, ConfigError> {
        Self::new(
            self.epsilon,
            self.snap_resolution,
            self.base_winding_size,
            self.trace_side_limit,
        )
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            epsilon: CLIP_EPSILON,
            snap_resolution: SNAP_RESOLUTION,
            base_winding_size: BASE_WINDING_SIZE,
            trace_side_limit: TRACE_SIDE_LIMIT,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Raised when the classification tolerance is not a positive number.
    InvalidEpsilon(f64),
    /// Raised when the snapping resolution is not a positive number.
    InvalidSnapResolution(f64),
    /// Raised when the seed winding size is not a positive number.
    InvalidWindingSize(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidEpsilon(value) => {
                write!(f, "epsilon must be positive: {value}")
            }
            ConfigError::InvalidSnapResolution(value) => {
                write!(f, "snap_resolution must be positive: {value}")
            }
            ConfigError::InvalidWindingSize(value) => {
                write!(f, "base_winding_size must be positive: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
