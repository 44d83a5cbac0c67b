//! # Winding
//!
//! Ordered point loop describing a convex polygon on one plane, with
//! half-space clipping and grid snapping.

use glam::DVec3;

use super::plane::{classify_distance, Classification, Plane};

// =============================================================================
// CLIP OUTCOME
// =============================================================================

/// Result of clipping a winding against a half-space.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipOutcome {
    /// The winding straddled the plane; this is the part in front of it.
    Clipped(Winding),
    /// No point was behind the plane; the input is kept as is.
    Unchanged,
    /// No point was in front of the plane; nothing remains.
    Removed,
}

// =============================================================================
// WINDING
// =============================================================================

/// Convex polygon boundary as an ordered, cyclic point list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Winding {
    points: Vec<DVec3>,
}

impl Winding {
    /// Creates a winding from ordered points.
    pub fn new(points: Vec<DVec3>) -> Self {
        Self { points }
    }

    /// Returns the points in loop order.
    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the winding has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns true if the winding has enough points to form a polygon.
    #[inline]
    pub fn is_polygon(&self) -> bool {
        self.points.len() >= 3
    }

    /// Clips the winding against the half-space of `plane`, keeping the part
    /// in front of it.
    ///
    /// Points within `epsilon` of the plane are kept verbatim. Where an edge
    /// crosses the plane the crossing point is inserted; on axes where the
    /// plane normal is exactly `±1` the crossing coordinate is taken from the
    /// plane distance instead of being interpolated.
    pub fn clip(&self, plane: &Plane, epsilon: f64) -> ClipOutcome {
        let count = self.points.len();
        let mut distances = Vec::with_capacity(count);
        let mut sides = Vec::with_capacity(count);
        let mut front_count = 0;
        let mut back_count = 0;

        for point in &self.points {
            let distance = plane.signed_distance(*point);
            let side = classify_distance(distance, epsilon);
            match side {
                Classification::Front => front_count += 1,
                Classification::Back => back_count += 1,
                Classification::On => {}
            }
            distances.push(distance);
            sides.push(side);
        }

        if front_count == 0 {
            return ClipOutcome::Removed;
        }
        if back_count == 0 {
            return ClipOutcome::Unchanged;
        }

        let exact: [Option<f64>; 3] = [
            plane.axis_coordinate(0),
            plane.axis_coordinate(1),
            plane.axis_coordinate(2),
        ];

        let mut front = Vec::with_capacity(count + 4);
        for i in 0..count {
            let j = (i + 1) % count;
            let current = self.points[i];

            match sides[i] {
                Classification::On => {
                    front.push(current);
                    continue;
                }
                Classification::Front => front.push(current),
                Classification::Back => {}
            }

            if sides[j] == Classification::On || sides[j] == sides[i] {
                continue;
            }

            let next = self.points[j];
            let t = distances[i] / (distances[i] - distances[j]);
            let mut crossing = current + (next - current) * t;
            for (axis, value) in exact.iter().enumerate() {
                if let Some(value) = value {
                    crossing[axis] = *value;
                }
            }
            front.push(crossing);
        }

        ClipOutcome::Clipped(Winding::new(front))
    }

    /// Consuming variant of [`Winding::clip`]: `None` once nothing remains.
    pub fn clip_owned(self, plane: &Plane, epsilon: f64) -> Option<Winding> {
        match self.clip(plane, epsilon) {
            ClipOutcome::Clipped(winding) => Some(winding),
            ClipOutcome::Unchanged => Some(self),
            ClipOutcome::Removed => None,
        }
    }

    /// Snaps every point to the grid and drops points that collapse onto
    /// their predecessor in the loop.
    pub fn snapped(self, resolution: f64) -> Winding {
        let mut points: Vec<DVec3> = Vec::with_capacity(self.points.len());
        for point in self.points {
            let point = snap_point(point, resolution);
            if points.last() != Some(&point) {
                points.push(point);
            }
        }
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Winding::new(points)
    }
}

/// Rounds every coordinate to the nearest multiple of `1 / resolution`.
///
/// Zero is always `+0.0`.
#[inline]
pub fn snap_point(point: DVec3, resolution: f64) -> DVec3 {
    (point * resolution).round() / resolution + DVec3::ZERO
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use config::constants::{CLIP_EPSILON, SNAP_RESOLUTION};

    fn square() -> Winding {
        Winding::new(vec![
            DVec3::new(-1.0, -1.0, 0.0),
            DVec3::new(1.0, -1.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(-1.0, 1.0, 0.0),
        ])
    }

    #[test]
    fn test_clip_half_square() {
        let plane = Plane::new(DVec3::X, 0.0);
        let outcome = square().clip(&plane, CLIP_EPSILON);

        let expected = Winding::new(vec![
            DVec3::new(0.0, -1.0, 0.0),
            DVec3::new(1.0, -1.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ]);
        assert_eq!(outcome, ClipOutcome::Clipped(expected));
    }

    #[test]
    fn test_clip_fully_in_front_is_unchanged() {
        let plane = Plane::new(DVec3::X, -2.0);
        assert_eq!(square().clip(&plane, CLIP_EPSILON), ClipOutcome::Unchanged);
    }

    #[test]
    fn test_clip_fully_behind_is_removed() {
        let plane = Plane::new(DVec3::X, 2.0);
        assert_eq!(square().clip(&plane, CLIP_EPSILON), ClipOutcome::Removed);
    }

    #[test]
    fn test_clip_touching_edge_keeps_on_points() {
        // Plane through the left edge, square entirely in front
        let plane = Plane::new(DVec3::X, -1.0);
        assert_eq!(square().clip(&plane, CLIP_EPSILON), ClipOutcome::Unchanged);

        // Plane through the right edge, square entirely behind apart from it
        let plane = Plane::new(DVec3::X, 1.0);
        assert_eq!(square().clip(&plane, CLIP_EPSILON), ClipOutcome::Removed);
    }

    #[test]
    fn test_clip_through_vertices() {
        // Diagonal through two opposite corners keeps a triangle
        let plane = Plane::new(DVec3::new(1.0, -1.0, 0.0).normalize(), 0.0);
        let ClipOutcome::Clipped(winding) = square().clip(&plane, CLIP_EPSILON) else {
            panic!("expected a clipped winding");
        };
        assert_eq!(
            winding.points(),
            &[
                DVec3::new(-1.0, -1.0, 0.0),
                DVec3::new(1.0, -1.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_clip_negative_axis_plane_uses_exact_coordinate() {
        let plane = Plane::new(-DVec3::X, -0.3);
        let ClipOutcome::Clipped(winding) = square().clip(&plane, CLIP_EPSILON) else {
            panic!("expected a clipped winding");
        };
        assert_eq!(winding.len(), 4);
        let xs: Vec<f64> = winding.points().iter().map(|p| p.x).collect();
        assert!(xs.contains(&0.3));
        assert!(xs.iter().all(|x| *x <= 0.3));
    }

    #[test]
    fn test_clip_owned() {
        let plane = Plane::new(DVec3::X, -2.0);
        assert_eq!(square().clip_owned(&plane, CLIP_EPSILON), Some(square()));

        let plane = Plane::new(DVec3::X, 2.0);
        assert_eq!(square().clip_owned(&plane, CLIP_EPSILON), None);
    }

    #[test]
    fn test_snap_point() {
        let p = snap_point(DVec3::new(0.001, -0.5004, 10.0039), SNAP_RESOLUTION);
        assert_eq!(p, DVec3::new(0.0, -0.5, 10.0));
        assert_eq!(snap_point(p, SNAP_RESOLUTION), p);
    }

    #[test]
    fn test_snap_point_drops_negative_zero() {
        let p = snap_point(DVec3::new(-1e-9, -0.003, 0.0), SNAP_RESOLUTION);
        assert_eq!(p.to_array().map(f64::to_bits), [0.0f64.to_bits(); 3]);
    }

    #[test]
    fn test_snapped_removes_collapsed_points() {
        let winding = Winding::new(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.0001, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0001, 0.0),
        ])
        .snapped(SNAP_RESOLUTION);

        assert_eq!(
            winding.points(),
            &[
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
            ]
        );
    }
}
