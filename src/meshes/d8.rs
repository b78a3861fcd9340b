use glam::Vec3;

use crate::error::GeometryError;
use crate::geometry::MeshData;
use crate::meshes::outward;

/// Regular octahedron, circumradius 1, centered at the origin. Four upper
/// faces around +Y, then four lower faces.
pub fn build() -> Result<MeshData, GeometryError> {
    let positions = vec![
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(0.0, 0.0, -1.0),
    ];

    let indices = vec![
        2, 0, 4, //
        2, 4, 1, //
        2, 1, 5, //
        2, 5, 0, //
        3, 4, 0, //
        3, 1, 4, //
        3, 5, 1, //
        3, 0, 5,
    ];

    outward(MeshData::new(positions, Some(indices)))
}
