//! # Brush Reconstruction
//!
//! Turns a brush (a set of half-space planes) into one convex polygon per
//! drawn side.
//!
//! ## Strategies
//!
//! - [`Strategy::Clip`]: seed a huge square on each face plane and clip it
//!   by every other side. Default.
//! - [`Strategy::Intersection`]: intersect every triple of sides, keep the
//!   points inside all half-spaces, and sort them around the face.
//!
//! Both produce the same polygons for well-formed convex brushes. A face
//! that ends up with fewer than three points is skipped, never an error.

mod clip;
mod intersect;

#[cfg(test)]
mod tests;

use config::constants::{GeometryConfig, NODRAW_MATERIAL_PATTERN};
use glam::DVec3;
use log::debug;

use crate::displacement::Displacement;
use crate::error::{MeshError, MeshResult};
use crate::geometry::{Plane, Winding};
use crate::input::SolidInput;
use crate::trace::TraceSink;

use intersect::IntersectionCache;

// =============================================================================
// SIDE / BRUSH
// =============================================================================

/// One bounding plane of a brush with its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Side {
    /// Side id from the map file.
    pub id: i64,
    /// Half-space plane, normal pointing into the brush.
    pub plane: Plane,
    /// Material path.
    pub material: String,
    /// Whether this side produces geometry.
    pub drawn: bool,
    /// Validated displacement block, if any.
    pub displacement: Option<Displacement>,
}

impl Side {
    /// Returns true if the material matches the no-draw pattern.
    pub fn is_nodraw_material(&self) -> bool {
        self.material
            .to_ascii_lowercase()
            .contains(NODRAW_MATERIAL_PATTERN)
    }
}

/// A convex solid as an intersection of half-spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    /// Solid id from the map file.
    pub id: i64,
    /// Bounding sides, in file order.
    pub sides: Vec<Side>,
}

impl Brush {
    /// Derives planes, validates displacements and applies the visibility
    /// rule.
    ///
    /// # Errors
    ///
    /// - [`MeshError::MalformedSide`] if a side's points do not define a
    ///   finite plane
    /// - [`MeshError::InvalidDisplacement`] if a displacement block has the
    ///   wrong shape
    pub fn from_input(input: &SolidInput) -> MeshResult<Self> {
        let displaced = input.has_displacement();

        let sides = input
            .sides
            .iter()
            .map(|side| {
                let [p1, p2, p3] = side.points;
                let plane = Plane::from_points(p1, p2, p3);
                if !plane.is_finite() {
                    return Err(MeshError::malformed_side(input.id, side.id));
                }

                let displacement = side
                    .displacement
                    .as_ref()
                    .map(|disp| Displacement::from_input(disp, input.id, side.id))
                    .transpose()?;

                let mut side = Side {
                    id: side.id,
                    plane,
                    material: side.material.clone(),
                    drawn: false,
                    displacement,
                };
                // A displaced brush renders only its displaced faces
                side.drawn =
                    !side.is_nodraw_material() && !(displaced && side.displacement.is_none());
                Ok(side)
            })
            .collect::<MeshResult<Vec<_>>>()?;

        Ok(Self {
            id: input.id,
            sides,
        })
    }

    /// Returns true if the side at `index` produces geometry.
    #[inline]
    pub fn is_drawn(&self, index: usize) -> bool {
        self.sides[index].drawn
    }

    /// Returns true if any side produces geometry.
    pub fn has_drawn_sides(&self) -> bool {
        self.sides.iter().any(|side| side.drawn)
    }

    /// Returns true if `point` lies inside every half-space within
    /// `epsilon`, drawn or not.
    pub fn contains(&self, point: DVec3, epsilon: f64) -> bool {
        self.sides
            .iter()
            .all(|side| side.plane.contains(point, epsilon))
    }
}

// =============================================================================
// STRATEGY
// =============================================================================

/// Face reconstruction algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Successive clipping of a seed square.
    #[default]
    Clip,
    /// Triple-plane intersection with hull test.
    Intersection,
}

impl Strategy {
    /// Maps the numeric loader method (`0` or `1`) to a strategy.
    pub fn from_method(method: u32) -> Option<Self> {
        match method {
            0 => Some(Self::Clip),
            1 => Some(Self::Intersection),
            _ => None,
        }
    }
}

// =============================================================================
// RECONSTRUCTION
// =============================================================================

/// A reconstructed face polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Index of the side this face lies on.
    pub side: usize,
    /// Snapped polygon, counter-clockwise around the inward normal.
    pub winding: Winding,
}

/// All faces reconstructed for one brush.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrushFaces {
    pub faces: Vec<Face>,
}

impl BrushFaces {
    /// Mean of every face point, weighted by vertex count rather than area.
    ///
    /// `None` when no face survived.
    pub fn centroid(&self) -> Option<DVec3> {
        let (sum, count) = self
            .faces
            .iter()
            .flat_map(|face| face.winding.points())
            .fold((DVec3::ZERO, 0usize), |(sum, count), p| (sum + *p, count + 1));

        (count > 0).then(|| sum / count as f64)
    }
}

/// Face-by-face reconstruction of one brush.
///
/// Keeps the triple-intersection cache alive across the faces of a brush so
/// each unordered triple is solved once.
pub struct Reconstructor<'a> {
    brush: &'a Brush,
    strategy: Strategy,
    config: GeometryConfig,
    intersections: IntersectionCache,
}

impl<'a> Reconstructor<'a> {
    pub fn new(brush: &'a Brush, strategy: Strategy, config: GeometryConfig) -> Self {
        Self {
            brush,
            strategy,
            config,
            intersections: IntersectionCache::default(),
        }
    }

    /// Reconstructs the polygon of one side.
    ///
    /// Does not check the visibility rule. Returns `None` when fewer than
    /// three points remain after snapping.
    pub fn face(&mut self, side: usize, trace: &mut dyn TraceSink) -> Option<Winding> {
        let winding = match self.strategy {
            Strategy::Clip => clip::clip_face(self.brush, side, &self.config, trace),
            Strategy::Intersection => intersect::intersect_face(
                self.brush,
                side,
                &self.config,
                &mut self.intersections,
                trace,
            ),
        };

        if winding.is_polygon() {
            Some(winding)
        } else {
            debug!(
                "solid {}: side {} skipped with {} points",
                self.brush.id,
                self.brush.sides[side].id,
                winding.len()
            );
            None
        }
    }
}

/// Reconstructs every drawn face of a brush.
///
/// # Example
///
/// ```rust
/// use brush_mesh::brush::{reconstruct, Brush, Strategy};
/// use brush_mesh::input::{SideInput, SolidInput};
/// use brush_mesh::trace::NoTrace;
/// use config::constants::GeometryConfig;
/// use glam::DVec3;
///
/// // Tetrahedron x >= 0, y >= 0, z >= 0, x + y + z <= 1
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
/// let brush = Brush::from_input(&solid).unwrap();
/// let faces = reconstruct(&brush, Strategy::Clip, &GeometryConfig::default(), &mut NoTrace);
/// assert_eq!(faces.faces.len(), 4);
/// assert!(faces.faces.iter().all(|face| face.winding.len() == 3));
/// ```
pub fn reconstruct(
    brush: &Brush,
    strategy: Strategy,
    config: &GeometryConfig,
    trace: &mut dyn TraceSink,
) -> BrushFaces {
    let mut reconstructor = Reconstructor::new(brush, strategy, *config);
    let faces = (0..brush.sides.len())
        .filter(|&side| brush.is_drawn(side))
        .filter_map(|side| {
            reconstructor
                .face(side, trace)
                .map(|winding| Face { side, winding })
        })
        .collect();

    BrushFaces { faces }
}
