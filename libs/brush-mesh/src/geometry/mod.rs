//! # Geometry Primitives
//!
//! Planes and windings: the two building blocks every brush face is
//! reconstructed from.

pub mod plane;
pub mod winding;

pub use plane::{Classification, Plane};
pub use winding::{snap_point, ClipOutcome, Winding};
