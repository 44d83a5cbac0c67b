//! # Displacement Surfaces
//!
//! Subdivides a four-corner brush face into a `(2^P + 1)²` vertex grid,
//! pushes every grid vertex along its per-cell vectors and triangulates the
//! grid with alternating diagonals.
//!
//! ## Normals
//!
//! Each triangle's unit normal is summed onto its three vertices and the sums
//! are normalized once the face is complete. Vertices on the four grid edges
//! are returned as [`BoundaryVertex`] records; after every brush is emitted,
//! [`smooth_boundaries`] averages normals of coincident boundary vertices so
//! neighbouring surfaces meet without a shading seam.

mod smoothing;


pub use smoothing::{smooth_boundaries, BoundaryVertex, SmoothingTable};

use config::constants::MAX_DISPLACEMENT_POWER;
use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::geometry::Winding;
use crate::input::DisplacementInput;
use crate::mesh::VertexBuffer;
use crate::trace::{TraceEvent, TraceSink};

// =============================================================================
// DEFINITION
// =============================================================================

/// A validated displacement block.
///
/// Every per-cell array is guaranteed to hold [`Displacement::vertex_count`]
/// entries, except `offsets`, which may also be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Displacement {
    power: u32,
    elevation: f64,
    start_position: DVec3,
    normals: Vec<DVec3>,
    offsets: Vec<DVec3>,
    offset_normals: Vec<DVec3>,
    distances: Vec<f64>,
}

impl Displacement {
    /// Validates a parsed displacement block.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidDisplacement`] when the power exceeds
    /// [`MAX_DISPLACEMENT_POWER`] or a per-cell array has the wrong length.
    pub fn from_input(input: &DisplacementInput, solid_id: i64, side_id: i64) -> MeshResult<Self> {
        if input.power > MAX_DISPLACEMENT_POWER {
            return Err(MeshError::invalid_displacement(
                solid_id,
                side_id,
                format!(
                    "power {} exceeds {}",
                    input.power, MAX_DISPLACEMENT_POWER
                ),
            ));
        }

        let expected = grid_vertex_count(input.power);
        let lengths = [
            ("normals", input.normals.len()),
            ("offset_normals", input.offset_normals.len()),
            ("distances", input.distances.len()),
        ];
        for (name, len) in lengths {
            if len != expected {
                return Err(MeshError::invalid_displacement(
                    solid_id,
                    side_id,
                    format!("{name} has {len} entries, expected {expected}"),
                ));
            }
        }
        if !input.offsets.is_empty() && input.offsets.len() != expected {
            return Err(MeshError::invalid_displacement(
                solid_id,
                side_id,
                format!(
                    "offsets has {} entries, expected 0 or {expected}",
                    input.offsets.len()
                ),
            ));
        }

        Ok(Self {
            power: input.power,
            elevation: input.elevation,
            start_position: input.start_position,
            normals: input.normals.clone(),
            offsets: input.offsets.clone(),
            offset_normals: input.offset_normals.clone(),
            distances: input.distances.clone(),
        })
    }

    /// Subdivision power.
    #[inline]
    pub fn power(&self) -> u32 {
        self.power
    }

    /// Cells per grid edge, `2^power`.
    #[inline]
    pub fn cells_per_edge(&self) -> usize {
        1 << self.power
    }

    /// Grid vertices, `(2^power + 1)²`.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        grid_vertex_count(self.power)
    }

    /// Triangles emitted by [`tessellate`], `2 · (2^power)²`.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        let cells = self.cells_per_edge();
        cells * cells * 2
    }

    /// Offset of grid vertex `index` from its interpolated position.
    fn displacement_at(&self, index: usize) -> DVec3 {
        let offset = self.offsets.get(index).copied().unwrap_or(DVec3::ZERO);
        self.normals[index] * self.distances[index]
            + self.offset_normals[index] * self.elevation
            + offset
    }
}

fn grid_vertex_count(power: u32) -> usize {
    let side = (1usize << power) + 1;
    side * side
}

/// Index of the corner closest to `start`.
///
/// The first corner wins ties.
pub fn start_corner(corners: &[DVec3], start: DVec3) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, corner) in corners.iter().enumerate() {
        let distance = corner.distance_squared(start);
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    best
}

// =============================================================================
// TESSELLATION
// =============================================================================

/// Tessellates a displacement over a reconstructed face.
///
/// Appends `vertex_count()` vertices and `triangle_count()` triangles to
/// `buffer` and returns the grid-edge vertices for map-wide smoothing.
/// Returns `None` without touching `buffer` unless `corners` has exactly
/// four points.
pub fn tessellate(
    displacement: &Displacement,
    corners: &Winding,
    buffer: &mut VertexBuffer,
    trace: &mut dyn TraceSink,
) -> Option<Vec<BoundaryVertex>> {
    let corners: &[DVec3; 4] = corners.points().try_into().ok()?;

    let start = start_corner(corners, displacement.start_position);
    let origin = corners[start];
    let first_edge = corners[(start + 1) % 4];
    let far_origin = corners[(start + 3) % 4];
    let far_edge = corners[(start + 2) % 4];

    let cells = displacement.cells_per_edge();
    let side = cells + 1;
    let fract = 1.0 / cells as f64;
    let base = buffer.vertex_count() as u32;

    for i in 0..side {
        let row_start = origin.lerp(first_edge, i as f64 * fract);
        let row_end = far_origin.lerp(far_edge, i as f64 * fract);

        for j in 0..side {
            let position = row_start.lerp(row_end, j as f64 * fract)
                + displacement.displacement_at(i * side + j);
            buffer.add_vertex(position, DVec3::ZERO);
        }
    }

    let index = |i: usize, j: usize| base + (i * side + j) as u32;

    let mut flag = true;
    for i in 0..cells {
        for j in 0..cells {
            let a = index(i, j);
            let b = index(i + 1, j);
            let c = index(i + 1, j + 1);
            let d = index(i, j + 1);

            let triangles = if flag {
                [[c, b, a], [d, c, a]]
            } else {
                [[d, b, a], [d, c, b]]
            };
            for triangle in triangles {
                add_shaded_triangle(buffer, triangle);
            }

            if trace.enabled() {
                trace.record(TraceEvent::TrianglesAdded {
                    count: 2,
                    displacement: true,
                });
            }

            flag = !flag;
        }
        flag = !flag;
    }

    if trace.enabled() {
        trace.record(TraceEvent::DisplacementDone);
    }

    for offset in 0..displacement.vertex_count() as u32 {
        let vertex = base + offset;
        let normal = buffer.vertex(vertex).normal.normalize_or_zero();
        buffer.set_normal(vertex, normal);
    }

    let boundary = grid_boundary(side)
        .map(|(i, j)| {
            let vertex = index(i, j);
            BoundaryVertex {
                index: vertex,
                position: buffer.vertex(vertex).position,
            }
        })
        .collect();

    Some(boundary)
}

/// Adds a triangle and sums its unit normal onto its vertices.
fn add_shaded_triangle(buffer: &mut VertexBuffer, [v0, v1, v2]: [u32; 3]) {
    let p0 = buffer.vertex(v0).position;
    let p1 = buffer.vertex(v1).position;
    let p2 = buffer.vertex(v2).position;
    let normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();

    buffer.add_triangle(v0, v1, v2);
    for vertex in [v0, v1, v2] {
        buffer.accumulate_normal(vertex, normal);
    }
}

/// Grid coordinates on the four edges of a `side × side` grid, each once.
fn grid_boundary(side: usize) -> impl Iterator<Item = (usize, usize)> {
    let last = side - 1;
    let rows = (0..side).flat_map(move |j| [(0, j), (last, j)]);
    let columns = (1..last).flat_map(move |i| [(i, 0), (i, last)]);
    rows.chain(columns)
}
