//! # Brush Reconstruction Tests
//!
//! Both strategies on boxes, the visibility rule, fatal input errors and
//! the trace records each strategy produces.

use super::*;
use crate::input::{DisplacementInput, SideInput};
use crate::trace::{NoTrace, TraceEvent};
use config::constants::CLIP_EPSILON;

fn side(id: i64, points: [DVec3; 3]) -> SideInput {
    SideInput {
        id,
        points,
        material: "brick/brickwall001a".into(),
        displacement: None,
    }
}

/// Axis-aligned box with sides ordered -X, +X, -Y, +Y, -Z, +Z.
fn box_solid(id: i64, min: DVec3, max: DVec3) -> SolidInput {
    SolidInput {
        id,
        sides: vec![
            side(1, [DVec3::new(min.x, 0.0, 0.0), DVec3::new(min.x, 1.0, 0.0), DVec3::new(min.x, 0.0, 1.0)]),
            side(2, [DVec3::new(max.x, 0.0, 0.0), DVec3::new(max.x, 0.0, 1.0), DVec3::new(max.x, 1.0, 0.0)]),
            side(3, [DVec3::new(0.0, min.y, 0.0), DVec3::new(0.0, min.y, 1.0), DVec3::new(1.0, min.y, 0.0)]),
            side(4, [DVec3::new(0.0, max.y, 0.0), DVec3::new(1.0, max.y, 0.0), DVec3::new(0.0, max.y, 1.0)]),
            side(5, [DVec3::new(0.0, 0.0, min.z), DVec3::new(1.0, 0.0, min.z), DVec3::new(0.0, 1.0, min.z)]),
            side(6, [DVec3::new(0.0, 0.0, max.z), DVec3::new(0.0, 1.0, max.z), DVec3::new(1.0, 0.0, max.z)]),
        ],
    }
}

fn unit_cube() -> Brush {
    Brush::from_input(&box_solid(1, DVec3::splat(-0.5), DVec3::splat(0.5))).unwrap()
}

fn sorted_points(winding: &Winding) -> Vec<[f64; 3]> {
    let mut points: Vec<[f64; 3]> = winding.points().iter().map(|p| p.to_array()).collect();
    points.sort_by(|a, b| a.partial_cmp(b).unwrap());
    points
}

// =============================================================================
// SIDES
// =============================================================================

#[test]
fn test_box_planes_point_inward() {
    let brush = unit_cube();
    for side in &brush.sides {
        assert!(side.plane.contains(DVec3::ZERO, CLIP_EPSILON));
        assert_eq!(side.plane.distance(), -0.5);
    }
}

#[test]
fn test_malformed_side_is_fatal() {
    let mut solid = box_solid(7, DVec3::ZERO, DVec3::ONE);
    solid.sides[3].points = [DVec3::ONE; 3];

    let err = Brush::from_input(&solid).unwrap_err();
    assert!(matches!(
        err,
        MeshError::MalformedSide {
            solid_id: 7,
            side_id: 4
        }
    ));
}

#[test]
fn test_nodraw_material_is_case_insensitive() {
    let mut solid = box_solid(1, DVec3::ZERO, DVec3::ONE);
    solid.sides[0].material = "TOOLS/TOOLSNODRAW".into();
    solid.sides[1].material = "tools/toolsskybox".into();

    let brush = Brush::from_input(&solid).unwrap();
    assert!(!brush.is_drawn(0));
    assert!(!brush.is_drawn(1));
    assert!(brush.is_drawn(2));

    let faces = reconstruct(&brush, Strategy::Clip, &GeometryConfig::default(), &mut NoTrace);
    assert_eq!(faces.faces.len(), 4);
    assert!(faces.faces.iter().all(|face| face.side >= 2));
}

#[test]
fn test_displaced_brush_draws_only_displaced_sides() {
    let mut solid = box_solid(1, DVec3::ZERO, DVec3::ONE);
    solid.sides[5].displacement = Some(DisplacementInput {
        power: 0,
        elevation: 0.0,
        start_position: DVec3::new(0.0, 0.0, 1.0),
        normals: vec![DVec3::Z; 4],
        offsets: Vec::new(),
        offset_normals: vec![DVec3::Z; 4],
        distances: vec![0.0; 4],
    });

    let brush = Brush::from_input(&solid).unwrap();
    assert!(brush.sides[5].displacement.is_some());
    let drawn: Vec<usize> = (0..6).filter(|&i| brush.is_drawn(i)).collect();
    assert_eq!(drawn, vec![5]);
}

#[test]
fn test_brush_contains_checks_every_side() {
    let mut solid = box_solid(1, DVec3::ZERO, DVec3::ONE);
    solid.sides[0].material = "tools/toolsnodraw".into();
    let brush = Brush::from_input(&solid).unwrap();

    assert!(brush.contains(DVec3::splat(0.5), CLIP_EPSILON));
    assert!(brush.contains(DVec3::ZERO, CLIP_EPSILON));
    // Outside the non-drawn side still counts
    assert!(!brush.contains(DVec3::new(-0.1, 0.5, 0.5), CLIP_EPSILON));
}

#[test]
fn test_strategy_from_method() {
    assert_eq!(Strategy::from_method(0), Some(Strategy::Clip));
    assert_eq!(Strategy::from_method(1), Some(Strategy::Intersection));
    assert_eq!(Strategy::from_method(2), None);
    assert_eq!(Strategy::default(), Strategy::Clip);
}

// =============================================================================
// RECONSTRUCTION
// =============================================================================

#[test]
fn test_unit_cube_both_strategies() {
    let brush = unit_cube();
    for strategy in [Strategy::Clip, Strategy::Intersection] {
        let faces = reconstruct(&brush, strategy, &GeometryConfig::default(), &mut NoTrace);

        assert_eq!(faces.faces.len(), 6, "{strategy:?}");
        for face in &faces.faces {
            assert_eq!(face.winding.len(), 4, "{strategy:?}");
            let plane = brush.sides[face.side].plane;
            for point in face.winding.points() {
                assert!(plane.signed_distance(*point).abs() <= CLIP_EPSILON);
                assert_eq!(point.abs(), DVec3::splat(0.5));
            }
        }
        assert_eq!(faces.centroid(), Some(DVec3::ZERO));
    }
}

#[test]
fn test_strategies_agree_on_box() {
    let brush = Brush::from_input(&box_solid(2, DVec3::new(-3.0, 0.0, 2.0), DVec3::new(5.0, 1.5, 9.0))).unwrap();
    let config = GeometryConfig::default();

    let clipped = reconstruct(&brush, Strategy::Clip, &config, &mut NoTrace);
    let intersected = reconstruct(&brush, Strategy::Intersection, &config, &mut NoTrace);

    assert_eq!(clipped.faces.len(), intersected.faces.len());
    for (a, b) in clipped.faces.iter().zip(&intersected.faces) {
        assert_eq!(a.side, b.side);
        assert_eq!(sorted_points(&a.winding), sorted_points(&b.winding));
    }
    assert_eq!(clipped.centroid(), intersected.centroid());
}

#[test]
fn test_windings_turn_around_inward_normal() {
    let brush = unit_cube();
    for strategy in [Strategy::Clip, Strategy::Intersection] {
        let faces = reconstruct(&brush, strategy, &GeometryConfig::default(), &mut NoTrace);
        for face in &faces.faces {
            let p = face.winding.points();
            let turn = (p[1] - p[0]).cross(p[2] - p[0]);
            assert!(turn.dot(brush.sides[face.side].plane.normal()) > 0.0, "{strategy:?}");
        }
    }
}

#[test]
fn test_redundant_side_produces_no_face() {
    let mut solid = box_solid(1, DVec3::splat(-0.5), DVec3::splat(0.5));
    // x + y >= -10, far outside the cube
    solid.sides.push(side(
        7,
        [DVec3::new(-10.0, 0.0, 0.0), DVec3::new(-10.0, 0.0, 1.0), DVec3::new(-9.0, -1.0, 0.0)],
    ));
    let brush = Brush::from_input(&solid).unwrap();
    assert!(brush.is_drawn(6));

    for strategy in [Strategy::Clip, Strategy::Intersection] {
        let faces = reconstruct(&brush, strategy, &GeometryConfig::default(), &mut NoTrace);
        assert_eq!(faces.faces.len(), 6, "{strategy:?}");
        assert!(faces.faces.iter().all(|face| face.side != 6));
        assert_eq!(faces.centroid(), Some(DVec3::ZERO));
    }
}

#[test]
fn test_empty_brush_faces_have_no_centroid() {
    assert_eq!(BrushFaces::default().centroid(), None);
}

#[test]
fn test_reconstructor_reuses_intersections_across_faces() {
    let brush = unit_cube();
    let mut reconstructor = Reconstructor::new(&brush, Strategy::Intersection, GeometryConfig::default());

    let first = reconstructor.face(0, &mut NoTrace).unwrap();
    let again = reconstructor.face(0, &mut NoTrace).unwrap();
    assert_eq!(first, again);
    // -X with the four Y/Z pairs
    assert_eq!(reconstructor.intersections.len(), 4);

    reconstructor.face(2, &mut NoTrace).unwrap();
    // -Y shares two corners' triples with -X
    assert_eq!(reconstructor.intersections.len(), 6);
}

// =============================================================================
// TRACE
// =============================================================================

#[test]
fn test_clip_trace_records_every_clip() {
    let brush = unit_cube();
    let mut events: Vec<TraceEvent> = Vec::new();
    reconstruct(&brush, Strategy::Clip, &GeometryConfig::default(), &mut events);

    // Seed plus four perpendicular clips per face
    assert_eq!(events.len(), 30);
    assert!(matches!(
        events[0],
        TraceEvent::Winding {
            side: 0,
            clip_side: None,
            ..
        }
    ));
    assert!(matches!(
        events[1],
        TraceEvent::Winding {
            side: 0,
            clip_side: Some(2),
            clip_plane: Some(_),
            ..
        }
    ));
}

#[test]
fn test_clip_trace_ends_with_empty_winding_when_removed() {
    let mut solid = box_solid(1, DVec3::splat(-0.5), DVec3::splat(0.5));
    solid.sides.push(side(
        7,
        [DVec3::new(-10.0, 0.0, 0.0), DVec3::new(-10.0, 0.0, 1.0), DVec3::new(-9.0, -1.0, 0.0)],
    ));
    let brush = Brush::from_input(&solid).unwrap();

    let mut events: Vec<TraceEvent> = Vec::new();
    let mut reconstructor = Reconstructor::new(&brush, Strategy::Clip, GeometryConfig::default());
    assert!(reconstructor.face(6, &mut events).is_none());

    match events.last() {
        Some(TraceEvent::Winding { points, .. }) => assert!(points.is_empty()),
        other => panic!("unexpected last event {other:?}"),
    }
}

#[test]
fn test_intersection_trace_records_candidates() {
    let brush = unit_cube();
    let mut events: Vec<TraceEvent> = Vec::new();
    reconstruct(&brush, Strategy::Intersection, &GeometryConfig::default(), &mut events);

    assert_eq!(events.len(), 24);
    match &events[3] {
        TraceEvent::Candidates {
            side,
            accepted,
            rejected,
            ..
        } => {
            assert_eq!(*side, 0);
            assert_eq!(accepted.len(), 4);
            assert!(rejected.is_empty());
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_intersection_trace_suppressed_for_large_brushes() {
    let brush = unit_cube();
    let config = GeometryConfig {
        trace_side_limit: 6,
        ..GeometryConfig::default()
    };
    let mut events: Vec<TraceEvent> = Vec::new();
    let faces = reconstruct(&brush, Strategy::Intersection, &config, &mut events);

    assert!(events.is_empty());
    assert_eq!(faces.faces.len(), 6);
}
