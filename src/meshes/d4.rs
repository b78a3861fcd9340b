use glam::Vec3;

use crate::error::GeometryError;
use crate::geometry::MeshData;
use crate::meshes::outward;

/// Regular tetrahedron, circumradius 1, centered at the origin.
///
/// The result face is the one touching the ground: the d4 is read bottom-up.
pub fn build() -> Result<MeshData, GeometryError> {
    let n = 1.0 / 3.0_f32.sqrt();

    let positions = vec![
        Vec3::new(n, n, n),
        Vec3::new(n, -n, -n),
        Vec3::new(-n, n, -n),
        Vec3::new(-n, -n, n),
    ];

    let indices = vec![
        0, 1, 2, //
        0, 3, 1, //
        0, 2, 3, //
        1, 3, 2,
    ];

    outward(MeshData::new(positions, Some(indices)))
}
