//! Face polygons from triple-plane intersections.

use std::collections::{HashMap, HashSet};

use config::constants::GeometryConfig;
use glam::DVec3;

use super::Brush;
use crate::geometry::{snap_point, Plane, Winding};
use crate::trace::{TraceEvent, TraceSink};

/// Snapped intersection point of an unordered side triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Intersection {
    point: DVec3,
    inside: bool,
}

/// Per-brush cache keyed by the sorted side triple. `None` marks a
/// singular triple.
pub(super) type IntersectionCache = HashMap<[usize; 3], Option<Intersection>>;

fn triple_key(i: usize, j: usize, k: usize) -> [usize; 3] {
    let mut key = [i, j, k];
    key.sort_unstable();
    key
}

/// Collects the hull points lying on `side` and orders them into a loop.
pub(super) fn intersect_face(
    brush: &Brush,
    side: usize,
    config: &GeometryConfig,
    cache: &mut IntersectionCache,
    trace: &mut dyn TraceSink,
) -> Winding {
    let epsilon = config.epsilon;
    let plane = brush.sides[side].plane;
    let tracing = trace.enabled() && brush.sides.len() < config.trace_side_limit;

    let mut seen = HashSet::new();
    let mut accepted: Vec<DVec3> = Vec::new();
    let mut rejected: Vec<DVec3> = Vec::new();

    for (j, second) in brush.sides.iter().enumerate() {
        if plane.is_parallel_to(&second.plane, epsilon) {
            continue;
        }

        for (k, third) in brush.sides.iter().enumerate() {
            if plane.is_parallel_to(&third.plane, epsilon)
                || second.plane.is_parallel_to(&third.plane, epsilon)
            {
                continue;
            }

            let key = triple_key(side, j, k);
            if !seen.insert(key) {
                continue;
            }

            let cached = *cache.entry(key).or_insert_with(|| {
                Plane::intersect(&plane, &second.plane, &third.plane, epsilon).map(|point| {
                    Intersection {
                        inside: brush.contains(point, epsilon),
                        point: snap_point(point, config.snap_resolution),
                    }
                })
            });

            let Some(intersection) = cached else {
                continue;
            };

            if intersection.inside {
                // Four or more planes meeting at a corner yield the same point
                if !accepted.contains(&intersection.point) {
                    accepted.push(intersection.point);
                }
            } else {
                rejected.push(intersection.point);
            }

            if tracing {
                trace.record(TraceEvent::Candidates {
                    side,
                    plane,
                    accepted: accepted.clone(),
                    rejected: rejected.clone(),
                });
            }
        }
    }

    if accepted.len() < 3 {
        return Winding::new(accepted);
    }

    sort_around_center(&mut accepted, plane.normal(), epsilon);
    Winding::new(accepted)
}

/// Orders coplanar points counter-clockwise around `normal`.
///
/// Selection sort: starting from the first point, the next slot takes the
/// candidate that turns counter-clockwise from the current point and makes
/// the smallest angle with it. Ties keep the earlier candidate.
///
/// The turn test compares the sine of the angle, not the raw cross
/// product, so it holds at any face size.
fn sort_around_center(points: &mut [DVec3], normal: DVec3, epsilon: f64) {
    let count = points.len() as f64;
    let center = points.iter().copied().sum::<DVec3>() / count;

    for current in 0..points.len() - 1 {
        let from = points[current] - center;

        let mut best = current + 1;
        let mut best_dot = f64::MIN;

        for (candidate, point) in points.iter().enumerate().skip(current + 1) {
            let to = *point - center;
            if normal.dot(from.cross(to)) < epsilon * from.length() * to.length() {
                continue;
            }

            let dot = to.normalize().dot(from);
            if dot > best_dot {
                best_dot = dot;
                best = candidate;
            }
        }

        points.swap(current + 1, best);
    }
}
