//! # Vertex Buffer
//!
//! Append-only (position, normal) storage with triangle index lists, and the
//! fan emitter used for flat-shaded brush faces.

use glam::DVec3;

use crate::error::{MeshError, MeshResult};

/// A vertex as emitted by the reconstruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    /// Vertex position (f64 until packing)
    pub position: DVec3,
    /// Vertex normal
    pub normal: DVec3,
}

/// Growable vertex and triangle storage.
///
/// Indices handed out by [`VertexBuffer::add_vertex`] stay valid for the
/// lifetime of the buffer; vertices are never removed or reordered.
///
/// # Example
///
/// ```rust
/// use brush_mesh::mesh::VertexBuffer;
/// use glam::DVec3;
///
/// let mut buffer = VertexBuffer::new();
/// let square = [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y];
/// let start = buffer.emit_winding(&square, -DVec3::Z);
/// assert_eq!(start, 0);
/// assert_eq!(buffer.vertex_count(), 4);
/// assert_eq!(buffer.triangle_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBuffer {
    vertices: Vec<MeshVertex>,
    triangles: Vec<[u32; 3]>,
}

impl VertexBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the buffer holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3, normal: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(MeshVertex { position, normal });
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> MeshVertex {
        self.vertices[index as usize]
    }

    /// Overwrites the normal of one vertex.
    #[inline]
    pub fn set_normal(&mut self, index: u32, normal: DVec3) {
        self.vertices[index as usize].normal = normal;
    }

    /// Adds `normal` onto the running normal of one vertex.
    #[inline]
    pub fn accumulate_normal(&mut self, index: u32, normal: DVec3) {
        self.vertices[index as usize].normal += normal;
    }

    /// Emits a convex polygon as a triangle fan with one shared normal.
    ///
    /// Every point gets its own vertex; nothing is shared with earlier
    /// faces. Triangles are `(0, i + 2, i + 1)`, which reverses the loop so
    /// a polygon wound counter-clockwise around the inward plane normal
    /// faces outward. Returns the index of the first emitted vertex.
    pub fn emit_winding(&mut self, points: &[DVec3], normal: DVec3) -> u32 {
        let start = self.vertices.len() as u32;
        for point in points {
            self.add_vertex(*point, normal);
        }
        for i in 0..points.len().saturating_sub(2) as u32 {
            self.add_triangle(start, start + i + 2, start + i + 1);
        }
        start
    }

    /// Appends another buffer, offsetting its indices.
    ///
    /// Returns the index offset applied to `other`'s vertices.
    pub fn append(&mut self, other: VertexBuffer) -> MeshResult<u32> {
        let total = self.vertices.len() + other.vertices.len();
        if total > u32::MAX as usize {
            return Err(MeshError::TooManyVertices {
                count: total,
                max: u32::MAX as usize,
            });
        }

        let offset = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.triangles.extend(
            other
                .triangles
                .into_iter()
                .map(|[a, b, c]| [a + offset, b + offset, c + offset]),
        );
        Ok(offset)
    }

    /// Validates the buffer for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No triangle repeats an index
    /// - Every position and normal is finite
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        let triangles_ok = self.triangles.iter().all(|tri| {
            tri.iter().all(|&i| i < vertex_count)
                && tri[0] != tri[1]
                && tri[1] != tri[2]
                && tri[0] != tri[2]
        });

        triangles_ok
            && self
                .vertices
                .iter()
                .all(|v| v.position.is_finite() && v.normal.is_finite())
    }
}
