//! # Config Crate
//!
//! Centralized configuration constants for brush mesh reconstruction.
//! All tolerances, grid resolutions and buffer layout sizes are defined here
//! so the clipping, snapping and smoothing code never disagree on a value.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{CLIP_EPSILON, SNAP_RESOLUTION};
//!
//! // Classify a signed distance against the clipping tolerance
//! let distance: f64 = 0.001;
//! let on_plane = distance.abs() <= CLIP_EPSILON;
//! assert!(on_plane);
//!
//! // Snap a coordinate to the vertex grid
//! let snapped = (0.3 * SNAP_RESOLUTION).round() / SNAP_RESOLUTION;
//! assert_eq!(snapped, 38.0 / 128.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values
//! - **Map Compatible**: Tolerances match the map editor's own brush compiler

pub mod constants;
