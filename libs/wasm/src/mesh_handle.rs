//! # Mesh Handle
//!
//! WASM-friendly wrapper for the packed map buffers.

use std::collections::HashMap;

use brush_mesh::pipeline::MapMesh;
use wasm_bindgen::prelude::*;

/// Packed map geometry that can be accessed from JavaScript.
///
/// Both buffers are non-indexed triangle lists of interleaved
/// `[x, y, z, nx, ny, nz]` vertices.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const mesh = render_map(request);
///
/// const faces = mesh.face_vertices();  // Float32Array
/// const buffer = new THREE.InterleavedBuffer(faces, 6);
/// geometry.setAttribute('position', new THREE.InterleavedBufferAttribute(buffer, 3, 0));
/// geometry.setAttribute('normal', new THREE.InterleavedBufferAttribute(buffer, 3, 3));
///
/// const center = mesh.centroid(solidId); // Float64Array or undefined
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct MeshHandle {
    /// Flat-shaded brush faces
    faces: Vec<f32>,
    /// Smoothed displacement surfaces
    displacements: Vec<f32>,
    face_triangle_count: u32,
    displacement_triangle_count: u32,
    centroids: HashMap<i64, [f64; 3]>,
}

#[wasm_bindgen]
impl MeshHandle {
    /// Returns the number of triangles in the face buffer.
    #[wasm_bindgen(getter)]
    pub fn face_triangle_count(&self) -> u32 {
        self.face_triangle_count
    }

    /// Returns the number of triangles in the displacement buffer.
    #[wasm_bindgen(getter)]
    pub fn displacement_triangle_count(&self) -> u32 {
        self.displacement_triangle_count
    }

    /// Returns the face buffer as a Float32Array.
    ///
    /// Length: face_triangle_count * 18
    #[wasm_bindgen]
    pub fn face_vertices(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.faces[..])
    }

    /// Returns the displacement buffer as a Float32Array.
    ///
    /// Length: displacement_triangle_count * 18
    #[wasm_bindgen]
    pub fn displacement_vertices(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.displacements[..])
    }

    /// Returns the centroid of a solid as `[x, y, z]` in renderer axes.
    ///
    /// Undefined for unknown solids and solids that produced no geometry.
    #[wasm_bindgen]
    pub fn centroid(&self, solid_id: i64) -> Option<Vec<f64>> {
        self.centroids.get(&solid_id).map(|c| c.to_vec())
    }

    /// Returns true if neither buffer holds a triangle.
    #[wasm_bindgen]
    pub fn is_empty(&self) -> bool {
        self.face_triangle_count == 0 && self.displacement_triangle_count == 0
    }
}

impl MeshHandle {
    /// Copies the packed buffers out of a finished build.
    pub fn from_map(mesh: &MapMesh) -> Self {
        let centroids = mesh
            .centroids
            .iter()
            .filter_map(|(&id, centroid)| centroid.map(|c| (id, c.to_array())))
            .collect();

        Self {
            faces: mesh.faces.as_floats().to_vec(),
            displacements: mesh.displacements.as_floats().to_vec(),
            face_triangle_count: count_u32(mesh.face_triangle_count()),
            displacement_triangle_count: count_u32(mesh.displacement_triangle_count()),
            centroids,
        }
    }

    /// Face buffer floats, for hosts that are not JavaScript.
    pub fn face_floats(&self) -> &[f32] {
        &self.faces
    }

    /// Displacement buffer floats, for hosts that are not JavaScript.
    pub fn displacement_floats(&self) -> &[f32] {
        &self.displacements
    }
}

fn count_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
