use glam::Vec3;

use crate::error::GeometryError;
use crate::geometry::MeshData;
use crate::meshes::outward;

/// Regular dodecahedron, circumradius 1, centered at the origin.
///
/// Golden-ratio vertex construction; each pentagonal face is a fan of three
/// consecutive triangles sharing the face normal, so normal grouping yields
/// the 12 physical faces.
pub fn build() -> Result<MeshData, GeometryError> {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let r = 1.0 / t;
    // All three vertex families sit at distance sqrt(3) from the origin.
    let s = 1.0 / 3.0_f32.sqrt();

    #[rustfmt::skip]
    let raw: [[f32; 3]; 20] = [
        [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0],
        [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0],
        [0.0, -r, -t], [0.0, -r, t], [0.0, r, -t], [0.0, r, t],
        [-r, -t, 0.0], [-r, t, 0.0], [r, -t, 0.0], [r, t, 0.0],
        [-t, 0.0, -r], [t, 0.0, -r], [-t, 0.0, r], [t, 0.0, r],
    ];

    #[rustfmt::skip]
    let indices: Vec<u32> = vec![
        3, 11, 7, 3, 7, 15, 3, 15, 13,
        7, 19, 17, 7, 17, 6, 7, 6, 15,
        17, 4, 8, 17, 8, 10, 17, 10, 6,
        8, 0, 16, 8, 16, 2, 8, 2, 10,
        0, 12, 1, 0, 1, 18, 0, 18, 16,
        6, 10, 2, 6, 2, 13, 6, 13, 15,
        2, 16, 18, 2, 18, 3, 2, 3, 13,
        18, 1, 9, 18, 9, 11, 18, 11, 3,
        4, 14, 12, 4, 12, 0, 4, 0, 8,
        11, 9, 5, 11, 5, 19, 11, 19, 7,
        19, 5, 14, 19, 14, 4, 19, 4, 17,
        1, 12, 14, 1, 14, 5, 1, 5, 9,
    ];

    let positions = raw
        .iter()
        .map(|&[x, y, z]| Vec3::new(x, y, z) * s)
        .collect();

    outward(MeshData::new(positions, Some(indices)))
}
