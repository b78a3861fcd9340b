use glam::Vec3;

use crate::error::GeometryError;
use crate::geometry::MeshData;
use crate::meshes::outward;

/// Pentagonal trapezohedron: a belt ring of 10 vertices alternating above
/// and below the equator, capped by two pole vertices.
///
/// Vertex layout is load-bearing for the kite grouping pass: ring vertices
/// occupy indices 0..10 (ring position == vertex index), the bottom pole is
/// 10 and the top pole is 11. Kite `i` is the apex triangle
/// `(pole, ring[i], ring[i+2])` plus the belt triangle
/// `(ring[i], ring[i+1], ring[i+2])`; even kites hang from the top pole,
/// odd kites from the bottom. Apex/belt pairs are emitted kite by kite, so
/// kite `i` is also group `i` after grouping.
pub fn build() -> Result<MeshData, GeometryError> {
    let step = std::f32::consts::PI / 5.0;
    let belt = 0.105;

    let mut positions: Vec<Vec3> = (0..10)
        .map(|i| {
            let a = i as f32 * step;
            let h = if i % 2 == 0 { belt } else { -belt };
            Vec3::new(a.cos(), h, a.sin())
        })
        .collect();
    positions.push(Vec3::new(0.0, -1.0, 0.0));
    positions.push(Vec3::new(0.0, 1.0, 0.0));

    let mut indices: Vec<u32> = Vec::with_capacity(60);
    for i in 0..10u32 {
        let pole = if i % 2 == 0 { 11 } else { 10 };
        let (mid, far) = ((i + 1) % 10, (i + 2) % 10);
        indices.extend_from_slice(&[pole, i, far]);
        indices.extend_from_slice(&[i, mid, far]);
    }

    outward(MeshData::new(positions, Some(indices)))
}
