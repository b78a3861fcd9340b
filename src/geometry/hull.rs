//! Convex collision-hull extraction.
//!
//! Physics-engine convex-hull construction is sensitive to duplicate
//! near-coincident points producing degenerate faces, so mesh-generation
//! duplicates at shared edges are merged before the hull is handed over.

use std::collections::HashMap;

use glam::Vec3;

use crate::error::GeometryError;
use crate::geometry::MeshData;

/// Vertices merge when every coordinate rounds to the same multiple of this.
const MERGE_TOLERANCE: f32 = 1e-6;

/// Deduplicated vertex/face description of a single convex hull, in the
/// shape the external physics engine consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexArgs {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
}

impl ConvexArgs {
    /// Re-interpret the hull as a mesh, e.g. to re-run extraction on it.
    pub fn to_mesh(&self) -> MeshData {
        let indices = self.faces.iter().flatten().copied().collect();
        MeshData::new(self.vertices.clone(), Some(indices))
    }
}

fn quantize(v: Vec3) -> (i64, i64, i64) {
    let q = |c: f32| (c / MERGE_TOLERANCE).round() as i64;
    (q(v.x), q(v.y), q(v.z))
}

/// Extract a [`ConvexArgs`] from a triangle mesh, unifying vertices whose
/// rounded-coordinate keys collide and remapping the face list accordingly.
pub fn convex_args(mesh: &MeshData) -> Result<ConvexArgs, GeometryError> {
    let flat = mesh.triangle_indices()?;

    let mut seen: HashMap<(i64, i64, i64), u32> = HashMap::new();
    let mut vertices: Vec<Vec3> = Vec::new();
    let mut faces: Vec<[u32; 3]> = Vec::with_capacity(flat.len() / 3);

    for tri in flat.chunks_exact(3) {
        let mut face = [0u32; 3];
        for (slot, &index) in face.iter_mut().zip(tri) {
            let position = mesh.positions()[index as usize];
            *slot = *seen.entry(quantize(position)).or_insert_with(|| {
                vertices.push(position);
                (vertices.len() - 1) as u32
            });
        }
        faces.push(face);
    }

    Ok(ConvexArgs { vertices, faces })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_edge_duplicates_are_merged() {
        // Two triangles sharing an edge, emitted as soup (6 positions).
        let mesh = MeshData::new(
            vec![
                Vec3::ZERO,
                Vec3::X,
                Vec3::Y,
                Vec3::X,
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::Y,
            ],
            None,
        );
        let hull = convex_args(&mesh).unwrap();
        assert_eq!(hull.vertices.len(), 4);
        assert_eq!(hull.faces, vec![[0, 1, 2], [1, 3, 2]]);
    }

    #[test]
    fn near_coincident_vertices_collapse() {
        let jitter = Vec3::splat(MERGE_TOLERANCE * 0.4);
        let mesh = MeshData::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Y + jitter, Vec3::X, Vec3::Z],
            None,
        );
        let hull = convex_args(&mesh).unwrap();
        assert_eq!(hull.vertices.len(), 4);
    }

    #[test]
    fn extraction_is_idempotent_on_vertex_count() {
        let mesh = crate::meshes::d8::build().unwrap();
        let once = convex_args(&mesh).unwrap();
        let twice = convex_args(&once.to_mesh()).unwrap();
        assert_eq!(once.vertices.len(), twice.vertices.len());
    }
}
