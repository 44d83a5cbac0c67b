//! # Input Contract
//!
//! Solid, side and displacement data as delivered by the map parser.
//!
//! The reconstruction core expects every vector to be in render axes
//! already. Data straight from the map file can be converted once with
//! [`SolidInput::into_render_axes`].

use config::constants::DEFAULT_MATERIAL;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// One brush as a list of sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidInput {
    /// Solid id from the map file.
    pub id: i64,
    /// Bounding sides, in file order.
    pub sides: Vec<SideInput>,
}

/// One bounding plane of a solid and its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideInput {
    /// Side id from the map file.
    pub id: i64,
    /// Three points defining the plane, ordered so the normal points into
    /// the solid.
    pub points: [DVec3; 3],
    /// Material path, matched case-insensitively against the no-draw pattern.
    #[serde(default = "default_material")]
    pub material: String,
    /// Optional displacement block overriding this face.
    #[serde(default)]
    pub displacement: Option<DisplacementInput>,
}

/// Displacement block attached to a side.
///
/// Every per-cell array holds `(2^power + 1)^2` entries in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplacementInput {
    /// Subdivision power.
    pub power: u32,
    /// Distance applied along every offset normal.
    #[serde(default)]
    pub elevation: f64,
    /// Position closest to the grid's first corner.
    pub start_position: DVec3,
    /// Per-cell displacement directions.
    pub normals: Vec<DVec3>,
    /// Per-cell offsets; may be empty, meaning zero everywhere.
    #[serde(default)]
    pub offsets: Vec<DVec3>,
    /// Per-cell directions scaled by `elevation`.
    pub offset_normals: Vec<DVec3>,
    /// Per-cell distances along `normals`.
    pub distances: Vec<f64>,
}

fn default_material() -> String {
    DEFAULT_MATERIAL.to_string()
}

/// Converts a vector from the map's Z-up axes to the renderer's Y-up axes.
///
/// `(x, y, z) -> (x, z, -y)`
#[inline]
pub fn flip_vector(v: DVec3) -> DVec3 {
    DVec3::new(v.x, v.z, -v.y)
}

impl SolidInput {
    /// Applies [`flip_vector`] to every vector of the solid.
    pub fn into_render_axes(mut self) -> Self {
        for side in &mut self.sides {
            for point in &mut side.points {
                *point = flip_vector(*point);
            }
            if let Some(disp) = &mut side.displacement {
                disp.start_position = flip_vector(disp.start_position);
                for v in disp
                    .normals
                    .iter_mut()
                    .chain(disp.offsets.iter_mut())
                    .chain(disp.offset_normals.iter_mut())
                {
                    *v = flip_vector(*v);
                }
            }
        }
        self
    }

    /// Returns true if any side carries a displacement block.
    pub fn has_displacement(&self) -> bool {
        self.sides.iter().any(|side| side.displacement.is_some())
    }
}
