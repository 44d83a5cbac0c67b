//! WASM-facing entry points for map brush rendering.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. Native tests call [`render_map_internal`], which exposes
//! Rust error types directly and never touches a JS host.
//!
//! The request is JSON in the map's own Z-up axes:
//!
//! ```text
//! { "method": 0, "solids": [ { "id": 1, "sides": [ { "id": 1, "points": [[x,y,z],..], "material": "..", "displacement": {..} } ] } ] }
//! ```
//!
//! Every solid is converted to the renderer's Y-up axes before the build.
//!
//! ```
//! let json = r#"{ "method": 1, "solids": [] }"#;
//! let mesh = brush_mesh_wasm::render_map_internal(json).unwrap();
//! assert!(mesh.is_empty());
//! ```

use brush_mesh::pipeline::{build_map, BuildOptions};
use brush_mesh::trace::NoTrace;
use brush_mesh::{MeshError, SolidInput, Strategy};
use config::constants::FLOATS_PER_VERTEX;
use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::prelude::*;

mod mesh_handle;

pub use mesh_handle::MeshHandle;

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "brush-mesh-wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Returns the number of `f32` values per packed vertex (position, normal).
///
/// # Examples
/// ```
/// assert_eq!(brush_mesh_wasm::floats_per_vertex(), 6);
/// ```
#[wasm_bindgen]
pub fn floats_per_vertex() -> u32 {
    FLOATS_PER_VERTEX as u32
}

// =============================================================================
// REQUEST
// =============================================================================

/// Errors surfaced to JavaScript as strings.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The request is not valid JSON or does not match the input contract.
    #[error("Invalid request: {0}")]
    Request(#[from] serde_json::Error),

    /// `method` names no known reconstruction strategy.
    #[error("Unknown reconstruction method {0} (expected 0 or 1)")]
    UnknownMethod(u32),

    /// The map build failed.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// JSON body accepted by [`render_map`].
#[derive(Debug, Deserialize)]
struct MapRequest {
    /// 0 = successive clip, 1 = triple intersection.
    #[serde(default)]
    method: u32,
    solids: Vec<SolidInput>,
}

// =============================================================================
// RENDER
// =============================================================================

/// Builds the face and displacement buffers of a map.
///
/// # Errors
/// Returns a JavaScript error value containing a human-readable message
/// when the request is malformed or a solid cannot be built.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const mesh = render_map(JSON.stringify({ method: 0, solids }));
/// // geometry.setAttribute('position', ...mesh.face_vertices());
/// ```
#[wasm_bindgen]
pub fn render_map(request: &str) -> Result<MeshHandle, JsValue> {
    render_map_internal(request).map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Host-only variant of [`render_map`].
///
/// # Examples
/// ```
/// let err = brush_mesh_wasm::render_map_internal(r#"{ "method": 7, "solids": [] }"#)
///     .unwrap_err();
/// assert!(err.to_string().contains("method 7"));
/// ```
pub fn render_map_internal(request: &str) -> Result<MeshHandle, RenderError> {
    let request: MapRequest = serde_json::from_str(request)?;
    let strategy =
        Strategy::from_method(request.method).ok_or(RenderError::UnknownMethod(request.method))?;

    let solids: Vec<SolidInput> = request
        .solids
        .into_iter()
        .map(SolidInput::into_render_axes)
        .collect();

    let mesh = build_map(&solids, &BuildOptions::with_strategy(strategy), &mut NoTrace)?;
    Ok(MeshHandle::from_map(&mesh))
}
