use glam::Vec3;

use crate::error::GeometryError;
use crate::geometry::MeshData;
use crate::meshes::outward;

/// Cube, circumradius 1, centered at the origin. Each face is two
/// triangles emitted back to back, so normal grouping merges them.
pub fn build() -> Result<MeshData, GeometryError> {
    let h = 1.0 / 3.0_f32.sqrt();

    let positions = vec![
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(h, h, h),
        Vec3::new(-h, h, h),
    ];

    let indices = vec![
        0, 1, 2, 0, 2, 3, // -Z
        4, 6, 5, 4, 7, 6, // +Z
        0, 5, 1, 0, 4, 5, // -Y
        3, 2, 6, 3, 6, 7, // +Y
        0, 3, 7, 0, 7, 4, // -X
        1, 5, 6, 1, 6, 2, // +X
    ];

    outward(MeshData::new(positions, Some(indices)))
}
