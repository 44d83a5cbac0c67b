//! # Plane
//!
//! Half-space plane with point classification, seed windings and
//! three-plane intersection.
//!
//! A plane `(normal, distance)` describes the solid half-space
//! `{p : normal · p >= distance - ε}`; the normal therefore points *into*
//! the brush.

use glam::DVec3;

use super::winding::Winding;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classification of a point relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Point is in front of the plane (inside the half-space).
    Front,
    /// Point is behind the plane (outside the half-space).
    Back,
    /// Point is on the plane within tolerance.
    On,
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane in 3D space defined by unit normal and distance from origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal vector (unit length for well-formed planes).
    normal: DVec3,
    /// Distance from origin along normal.
    distance: f64,
}

impl Plane {
    /// Create plane from normal and distance.
    pub fn new(normal: DVec3, distance: f64) -> Self {
        Self { normal, distance }
    }

    /// Create plane from three points.
    ///
    /// The normal is `normalize((p2 - p1) × (p3 - p1))`. Collinear or
    /// coincident points produce a non-finite plane; callers must check
    /// [`Plane::is_finite`] before using the result.
    pub fn from_points(p1: DVec3, p2: DVec3, p3: DVec3) -> Self {
        let normal = (p2 - p1).cross(p3 - p1).normalize();
        Self {
            normal,
            distance: normal.dot(p1),
        }
    }

    /// Get the plane normal.
    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Get the plane distance.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Returns true if every component of the plane is finite.
    pub fn is_finite(&self) -> bool {
        self.normal.is_finite() && self.distance.is_finite()
    }

    /// Signed distance from point to plane.
    ///
    /// Positive = front (inside), negative = back, zero = on plane.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.distance
    }

    /// Returns true if the point lies inside the half-space within tolerance.
    #[inline]
    pub fn contains(&self, point: DVec3, epsilon: f64) -> bool {
        self.signed_distance(point) >= -epsilon
    }

    /// Returns true if the two planes are parallel or anti-parallel.
    #[inline]
    pub fn is_parallel_to(&self, other: &Plane, epsilon: f64) -> bool {
        self.normal.dot(other.normal).abs() > 1.0 - epsilon
    }

    /// Exact coordinate along `axis` for points on an axis-aligned plane.
    ///
    /// Returns `None` unless the normal component on that axis is exactly
    /// `1` or `-1`.
    pub fn axis_coordinate(&self, axis: usize) -> Option<f64> {
        let component = self.normal[axis];
        if component == 1.0 {
            Some(self.distance)
        } else if component == -1.0 {
            Some(-self.distance)
        } else {
            None
        }
    }

    /// Builds a square of side `size` lying in the plane.
    ///
    /// The square is centred on the projection of the origin. Its in-plane
    /// axes are derived from whichever world axis is not the dominant normal
    /// axis, so the cross products never degenerate. Points are ordered
    /// counter-clockwise when viewed from the front of the plane.
    pub fn base_winding(&self, size: f64) -> Winding {
        let components = self.normal.abs().to_array();
        let mut dominant = 0;
        let mut max = components[0];
        for (axis, &value) in components.iter().enumerate().skip(1) {
            if max < value {
                max = value;
                dominant = axis;
            }
        }

        let reference = if dominant == 1 { DVec3::X } else { DVec3::Y };
        let right = self.normal.cross(reference).normalize() * (size / 2.0);
        let up = self.normal.cross(right);
        let origin = self.normal * self.distance;

        Winding::new(vec![
            origin - right + up,
            origin - right - up,
            origin + right - up,
            origin + right + up,
        ])
    }

    /// Common point of three planes.
    ///
    /// Solved by Cramer's rule; returns `None` when
    /// `|a.n · (b.n × c.n)| < epsilon`.
    pub fn intersect(a: &Plane, b: &Plane, c: &Plane, epsilon: f64) -> Option<DVec3> {
        let bc = b.normal.cross(c.normal);
        let det = a.normal.dot(bc);
        if det.abs() < epsilon {
            return None;
        }

        let ca = c.normal.cross(a.normal);
        let ab = a.normal.cross(b.normal);
        Some((bc * a.distance + ca * b.distance + ab * c.distance) / det)
    }
}

/// Classify a signed distance against the tolerance band.
#[inline]
pub fn classify_distance(distance: f64, epsilon: f64) -> Classification {
    if distance > epsilon {
        Classification::Front
    } else if distance < -epsilon {
        Classification::Back
    } else {
        Classification::On
    }
}

// =============================================================================
// TESTS
// =============================================================================
