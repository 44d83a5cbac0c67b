//! # Map Build Pipeline
//!
//! Drives reconstruction over every solid of a map and produces the two
//! packed buffers.
//!
//! ## Phases
//!
//! ```text
//! SolidInput ─► Brush ─► per-solid buffers ─► merge (input order) ─► smoothing ─► pack
//! ```
//!
//! Solids never share geometry, so the per-solid phase can run on the rayon
//! pool. Merging restores input order before boundary smoothing, which keeps
//! the output identical to a sequential build.

use std::collections::HashMap;

use config::constants::GeometryConfig;
use glam::DVec3;
use log::{debug, warn};
use rayon::prelude::*;

use crate::brush::{Brush, BrushFaces, Face, Reconstructor, Strategy};
use crate::displacement::{smooth_boundaries, tessellate, BoundaryVertex};
use crate::error::MeshResult;
use crate::input::SolidInput;
use crate::mesh::VertexBuffer;
use crate::pack::PackedBuffer;
use crate::trace::{SolidTrace, TraceEvent, TraceSink};

// =============================================================================
// OPTIONS
// =============================================================================

/// Options for one map build.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BuildOptions {
    /// Face reconstruction algorithm.
    pub strategy: Strategy,
    /// Build solids on the rayon thread pool.
    pub parallel: bool,
    /// Tolerances and sizes.
    pub geometry: GeometryConfig,
}

impl BuildOptions {
    /// Options using `strategy` and default tolerances.
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

/// Packed geometry of a whole map.
#[derive(Debug, Clone, Default)]
pub struct MapMesh {
    /// Flat-shaded brush faces.
    pub faces: PackedBuffer,
    /// Smoothed displacement surfaces.
    pub displacements: PackedBuffer,
    /// Centroid per solid id; `None` for solids without geometry.
    pub centroids: HashMap<i64, Option<DVec3>>,
}

impl MapMesh {
    /// Centroid of a solid, for camera framing.
    ///
    /// `None` both for unknown ids and for solids that produced nothing.
    pub fn centroid(&self, solid_id: i64) -> Option<DVec3> {
        self.centroids.get(&solid_id).copied().flatten()
    }

    /// Triangles in the face buffer.
    pub fn face_triangle_count(&self) -> usize {
        self.faces.triangle_count()
    }

    /// Triangles in the displacement buffer.
    pub fn displacement_triangle_count(&self) -> usize {
        self.displacements.triangle_count()
    }
}

// =============================================================================
// BUILD
// =============================================================================

/// Unmerged geometry of one solid; indices are local to its buffers.
struct SolidGeometry {
    id: i64,
    faces: VertexBuffer,
    displacements: VertexBuffer,
    boundary: Vec<BoundaryVertex>,
    centroid: Option<DVec3>,
    trace: SolidTrace,
}

/// Builds the packed buffers for a list of solids.
///
/// # Errors
///
/// Fails on the first malformed side or displacement block, or when the
/// configured tolerances are invalid. Degenerate faces are skipped.
///
/// # Example
///
/// ```rust
/// use brush_mesh::input::{SideInput, SolidInput};
/// use brush_mesh::pipeline::{build_map, BuildOptions};
/// use brush_mesh::trace::NoTrace;
/// use glam::DVec3;
///
/// let side = |id, points| SideInput {
///     id,
///     points,
///     material: "brick/wall".into(),
///     displacement: None,
/// };
/// let solid = SolidInput {
///     id: 1,
///     sides: vec![
///         side(1, [DVec3::ZERO, DVec3::Y, DVec3::Z]),
///         side(2, [DVec3::ZERO, DVec3::Z, DVec3::X]),
///         side(3, [DVec3::ZERO, DVec3::X, DVec3::Y]),
///         side(4, [DVec3::X, DVec3::Z, DVec3::Y]),
///     ],
/// };
///
/// let mesh = build_map(&[solid], &BuildOptions::default(), &mut NoTrace).unwrap();
/// assert_eq!(mesh.face_triangle_count(), 4);
/// assert!(mesh.centroid(1).is_some());
/// ```
pub fn build_map(
    solids: &[SolidInput],
    options: &BuildOptions,
    trace: &mut dyn TraceSink,
) -> MeshResult<MapMesh> {
    let geometry = options.geometry.validated()?;
    let brushes = solids
        .iter()
        .map(Brush::from_input)
        .collect::<MeshResult<Vec<_>>>()?;

    let tracing = trace.enabled();
    let build = |brush: &Brush| build_solid(brush, options.strategy, &geometry, tracing);
    let built: Vec<SolidGeometry> = if options.parallel {
        brushes.par_iter().map(build).collect()
    } else {
        brushes.iter().map(build).collect()
    };

    let mut faces = merged_buffer(built.iter().map(|solid| &solid.faces));
    let mut displacements = merged_buffer(built.iter().map(|solid| &solid.displacements));
    let mut boundary = Vec::with_capacity(built.iter().map(|solid| solid.boundary.len()).sum());
    let mut centroids = HashMap::with_capacity(built.len());

    for solid in built {
        trace.record(TraceEvent::SolidStart {
            solid_id: solid.id,
            face_triangles: faces.triangle_count(),
            displacement_triangles: displacements.triangle_count(),
            centroid: solid.centroid,
        });
        solid.trace.replay(trace);

        faces.append(solid.faces)?;
        let offset = displacements.append(solid.displacements)?;
        boundary.extend(solid.boundary.into_iter().map(|vertex| BoundaryVertex {
            index: vertex.index + offset,
            ..vertex
        }));
        centroids.insert(solid.id, solid.centroid);
    }

    smooth_boundaries(&mut displacements, &boundary, geometry.snap_resolution);
    debug_assert!(faces.validate() && displacements.validate());

    debug!(
        "built {} solids: {} face triangles, {} displacement triangles, {} boundary vertices",
        solids.len(),
        faces.triangle_count(),
        displacements.triangle_count(),
        boundary.len()
    );

    Ok(MapMesh {
        faces: PackedBuffer::pack(&faces),
        displacements: PackedBuffer::pack(&displacements),
        centroids,
    })
}

/// Empty buffer sized to hold every per-solid buffer once merged.
fn merged_buffer<'a>(parts: impl Iterator<Item = &'a VertexBuffer>) -> VertexBuffer {
    let (vertices, triangles) = parts.fold((0, 0), |(v, t), part| {
        (v + part.vertex_count(), t + part.triangle_count())
    });
    VertexBuffer::with_capacity(vertices, triangles)
}

/// Reconstructs and emits every drawn face of one brush.
fn build_solid(
    brush: &Brush,
    strategy: Strategy,
    geometry: &GeometryConfig,
    tracing: bool,
) -> SolidGeometry {
    let mut trace = SolidTrace::new(tracing);
    let mut reconstructor = Reconstructor::new(brush, strategy, *geometry);

    let mut faces = VertexBuffer::new();
    let mut displacements = VertexBuffer::new();
    let mut boundary = Vec::new();
    let mut emitted = BrushFaces::default();

    for (index, side) in brush.sides.iter().enumerate() {
        if !side.drawn {
            continue;
        }
        let Some(winding) = reconstructor.face(index, &mut trace) else {
            continue;
        };

        match &side.displacement {
            Some(displacement) => {
                match tessellate(displacement, &winding, &mut displacements, &mut trace) {
                    Some(edges) => boundary.extend(edges),
                    None => debug!(
                        "solid {}: displacement on side {} skipped, face has {} corners",
                        brush.id,
                        side.id,
                        winding.len()
                    ),
                }
            }
            None => {
                faces.emit_winding(winding.points(), -side.plane.normal());
                trace.record(TraceEvent::TrianglesAdded {
                    count: winding.len() - 2,
                    displacement: false,
                });
            }
        }

        emitted.faces.push(Face {
            side: index,
            winding,
        });
    }

    if emitted.faces.is_empty() && brush.has_drawn_sides() {
        warn!("solid {} has drawn sides but produced no geometry", brush.id);
    }

    SolidGeometry {
        id: brush.id,
        faces,
        displacements,
        boundary,
        centroid: emitted.centroid(),
        trace,
    }
}
