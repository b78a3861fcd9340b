use glam::Vec3;

use crate::error::GeometryError;
use crate::geometry::MeshData;
use crate::meshes::outward;

/// Regular icosahedron, circumradius 1, centered at the origin.
pub fn build() -> Result<MeshData, GeometryError> {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let s = 1.0 / (1.0 + t * t).sqrt();

    #[rustfmt::skip]
    let raw: [[f32; 3]; 12] = [
        [-1.0, t, 0.0], [1.0, t, 0.0], [-1.0, -t, 0.0], [1.0, -t, 0.0],
        [0.0, -1.0, t], [0.0, 1.0, t], [0.0, -1.0, -t], [0.0, 1.0, -t],
        [t, 0.0, -1.0], [t, 0.0, 1.0], [-t, 0.0, -1.0], [-t, 0.0, 1.0],
    ];

    #[rustfmt::skip]
    let indices: Vec<u32> = vec![
        0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11,
        1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1, 8,
        3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9,
        4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
    ];

    let positions = raw
        .iter()
        .map(|&[x, y, z]| Vec3::new(x, y, z) * s)
        .collect();

    outward(MeshData::new(positions, Some(indices)))
}
