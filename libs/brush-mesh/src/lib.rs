//! # Brush Mesh
//!
//! Browser-safe reconstruction of convex map brushes into triangle meshes.
//! Consumes solids (plane triples, materials, displacement grids) and
//! produces two packed vertex buffers plus per-solid centroids.
//!
//! ## Architecture
//!
//! ```text
//! SolidInput → Brush → face windings → VertexBuffer → PackedBuffer
//!                             └─ displacement grid ─┘ (+ edge smoothing)
//! ```
//!
//! ## Algorithms
//!
//! All algorithms are pure Rust with no native dependencies:
//! - **Face reconstruction**: successive half-space clipping, or triple-plane
//!   intersection with a hull test
//! - **Robustness**: epsilon classification, exact axis-aligned crossings and
//!   snapping to a 1/128 grid
//! - **Displacements**: bilinear grids with alternating diagonals and
//!   cross-surface normal smoothing
//!
//! ## Usage
//!
//! ```rust,ignore
//! use brush_mesh::{build_map, BuildOptions, NoTrace};
//!
//! let solids: Vec<SolidInput> = serde_json::from_str(json)?;
//! let solids: Vec<_> = solids.into_iter().map(SolidInput::into_render_axes).collect();
//! let mesh = build_map(&solids, &BuildOptions::default(), &mut NoTrace)?;
//! upload(mesh.faces.as_bytes(), mesh.face_triangle_count());
//! ```

pub mod brush;
pub mod displacement;
pub mod error;
pub mod geometry;
pub mod input;
pub mod mesh;
pub mod pack;
pub mod pipeline;
pub mod trace;

pub use brush::{reconstruct, Brush, BrushFaces, Face, Strategy};
pub use error::{MeshError, MeshResult};
pub use geometry::{Plane, Winding};
pub use input::{DisplacementInput, SideInput, SolidInput};
pub use mesh::VertexBuffer;
pub use pack::{PackedBuffer, PackedVertex};
pub use pipeline::{build_map, BuildOptions, MapMesh};
pub use trace::{NoTrace, TraceEvent, TraceSink};
