#![allow(dead_code)]

use std::collections::HashMap;

use brush_mesh::input::{DisplacementInput, SideInput, SolidInput};
use brush_mesh::pack::PackedBuffer;
use glam::DVec3;

pub fn side(id: i64, points: [DVec3; 3]) -> SideInput {
    SideInput {
        id,
        points,
        material: "concrete/concretefloor001a".into(),
        displacement: None,
    }
}

/// Side whose plane has inward `normal` and passes through `point`.
pub fn plane_side(id: i64, normal: DVec3, point: DVec3) -> SideInput {
    let normal = normal.normalize();
    let u = normal.any_orthonormal_vector();
    let v = normal.cross(u);
    side(id, [point, point + u, point + v])
}

/// Axis-aligned box with sides ordered -X, +X, -Y, +Y, -Z, +Z.
pub fn box_solid(id: i64, min: DVec3, max: DVec3) -> SolidInput {
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

pub fn unit_cube(id: i64) -> SolidInput {
    box_solid(id, DVec3::splat(-0.5), DVec3::splat(0.5))
}

/// Tetrahedron x, y, z >= 0, x + y + z <= 1.
pub fn tetrahedron(id: i64) -> SolidInput {
    SolidInput {
        id,
        sides: vec![
            side(1, [DVec3::ZERO, DVec3::Y, DVec3::Z]),
            side(2, [DVec3::ZERO, DVec3::Z, DVec3::X]),
            side(3, [DVec3::ZERO, DVec3::X, DVec3::Y]),
            side(4, [DVec3::X, DVec3::Z, DVec3::Y]),
        ],
    }
}

/// Copy of `solid` with every plane point scaled about the origin.
pub fn scaled(mut solid: SolidInput, factor: f64) -> SolidInput {
    for side in &mut solid.sides {
        for point in &mut side.points {
            *point *= factor;
        }
    }
    solid
}

/// Unit cube [0, 1]³ with the +X/+Z edge bevelled by x + z <= 1.5.
pub fn bevelled_cube(id: i64) -> SolidInput {
    let mut solid = box_solid(id, DVec3::ZERO, DVec3::ONE);
    solid.sides.push(plane_side(
        7,
        DVec3::new(-1.0, 0.0, -1.0),
        DVec3::new(1.0, 0.0, 0.5),
    ));
    solid
}

/// Square pyramid over [-1, 1]² at z = 0 with its apex at (0, 0, 1).
///
/// Four sides meet at the apex.
pub fn pyramid(id: i64) -> SolidInput {
    let apex = DVec3::Z;
    SolidInput {
        id,
        sides: vec![
            plane_side(1, DVec3::Z, DVec3::ZERO),
            plane_side(2, DVec3::new(-1.0, 0.0, -1.0), apex),
            plane_side(3, DVec3::new(1.0, 0.0, -1.0), apex),
            plane_side(4, DVec3::new(0.0, -1.0, -1.0), apex),
            plane_side(5, DVec3::new(0.0, 1.0, -1.0), apex),
        ],
    }
}

/// Flat displacement block of the given power; every distance is zero.
pub fn flat_displacement(power: u32, start_position: DVec3) -> DisplacementInput {
    let side = (1usize << power) + 1;
    let count = side * side;
    DisplacementInput {
        power,
        elevation: 0.0,
        start_position,
        normals: vec![DVec3::Z; count],
        offsets: Vec::new(),
        offset_normals: vec![DVec3::Z; count],
        distances: vec![0.0; count],
    }
}

pub type PositionKey = [u32; 3];

fn position_key(position: [f32; 3]) -> PositionKey {
    position.map(f32::to_bits)
}

/// Directed edges without a reverse partner, keyed by exact position.
///
/// Empty for a closed, consistently wound surface.
pub fn unmatched_edges(buffer: &PackedBuffer) -> Vec<(PositionKey, PositionKey)> {
    let mut edges: HashMap<(PositionKey, PositionKey), i64> = HashMap::new();
    for triangle in buffer.vertices().chunks_exact(3) {
        let keys = [0, 1, 2].map(|i| position_key(triangle[i].position));
        for i in 0..3 {
            let (a, b) = (keys[i], keys[(i + 1) % 3]);
            *edges.entry((a, b)).or_default() += 1;
            *edges.entry((b, a)).or_default() -= 1;
        }
    }
    edges
        .into_iter()
        .filter(|(_, balance)| *balance > 0)
        .map(|(edge, _)| edge)
        .collect()
}
