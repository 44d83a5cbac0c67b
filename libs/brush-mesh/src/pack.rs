//! # Mesh Packer
//!
//! Flattens indexed triangles into interleaved `(x, y, z, nx, ny, nz)` f32
//! records, three per triangle, ready for upload as a vertex buffer.

use bytemuck::{Pod, Zeroable};

use crate::mesh::VertexBuffer;

/// One packed vertex, 24 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Non-indexed triangle list in the packed layout.
///
/// # Example
///
/// ```rust
/// use brush_mesh::mesh::VertexBuffer;
/// use brush_mesh::pack::PackedBuffer;
/// use glam::DVec3;
///
/// let mut buffer = VertexBuffer::new();
/// buffer.emit_winding(&[DVec3::ZERO, DVec3::X, DVec3::Y], -DVec3::Z);
///
/// let packed = PackedBuffer::pack(&buffer);
/// assert_eq!(packed.triangle_count(), 1);
/// assert_eq!(packed.as_bytes().len(), 72);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackedBuffer {
    vertices: Vec<PackedVertex>,
}

impl PackedBuffer {
    /// Packs every triangle of `buffer` in generation order.
    pub fn pack(buffer: &VertexBuffer) -> Self {
        let mut vertices = Vec::with_capacity(buffer.triangle_count() * 3);
        for triangle in buffer.triangles() {
            for &index in triangle {
                let vertex = buffer.vertex(index);
                vertices.push(PackedVertex {
                    position: vertex.position.as_vec3().to_array(),
                    normal: vertex.normal.as_vec3().to_array(),
                });
            }
        }
        Self { vertices }
    }

    /// Number of packed triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Packed vertices, three per triangle.
    #[inline]
    pub fn vertices(&self) -> &[PackedVertex] {
        &self.vertices
    }

    /// The buffer as `f32` values.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The buffer as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Returns true if no triangle was packed.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
