//! Map-wide normal smoothing across displacement edges.

use std::collections::HashMap;

use glam::DVec3;

use crate::mesh::VertexBuffer;

/// A displacement vertex on a grid edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryVertex {
    /// Index into the displacement vertex buffer.
    pub index: u32,
    /// Final position of the vertex.
    pub position: DVec3,
}

#[derive(Debug, Default)]
struct Bucket {
    normal: DVec3,
    indices: Vec<u32>,
}

/// Quantized position → accumulated normal and the vertices sharing it.
#[derive(Debug)]
pub struct SmoothingTable {
    resolution: f64,
    buckets: HashMap<[i64; 3], Bucket>,
}

impl SmoothingTable {
    /// Creates an empty table quantizing positions to `1 / resolution`.
    pub fn new(resolution: f64) -> Self {
        Self {
            resolution,
            buckets: HashMap::new(),
        }
    }

    /// Bucket key: each coordinate scaled and floored.
    pub fn key(&self, position: DVec3) -> [i64; 3] {
        let scaled = (position * self.resolution).floor();
        [scaled.x as i64, scaled.y as i64, scaled.z as i64]
    }

    /// Adds a vertex normal to the bucket of `position`.
    pub fn insert(&mut self, position: DVec3, normal: DVec3, index: u32) {
        let bucket = self.buckets.entry(self.key(position)).or_default();
        bucket.normal += normal;
        bucket.indices.push(index);
    }

    /// Number of distinct buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Writes each bucket's normalized sum to every vertex in it.
    pub fn apply(self, buffer: &mut VertexBuffer) {
        for bucket in self.buckets.into_values() {
            let normal = bucket.normal.normalize_or_zero();
            for index in bucket.indices {
                buffer.set_normal(index, normal);
            }
        }
    }
}

/// Averages the normals of boundary vertices sharing a quantized position.
///
/// Reads the current normals from `buffer` before writing any, so the
/// result does not depend on registration order.
pub fn smooth_boundaries(buffer: &mut VertexBuffer, boundary: &[BoundaryVertex], resolution: f64) {
    let mut table = SmoothingTable::new(resolution);
    for vertex in boundary {
        table.insert(vertex.position, buffer.vertex(vertex.index).normal, vertex.index);
    }
    table.apply(buffer);
}
