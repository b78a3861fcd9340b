//! Partitioning a die mesh into physical faces.
//!
//! A physical face is one printed numeral: a group of mesh triangles with a
//! shared outward normal and a centroid where the numeral label sits. Two
//! strategies exist. The default merges triangles by quantized normal, which
//! covers every regular solid. The pentagonal trapezohedron (d10) gets its
//! own pass: each numbered apex triangle and its unnumbered belt neighbour
//! form one kite face, and the pair is identified by ring-vertex adjacency
//! because the two triangles of a kite are not coplanar in this
//! construction, so normal equivalence never finds them.

use glam::Vec3;
use indexmap::IndexMap;
use tracing::debug;

use crate::error::GeometryError;
use crate::geometry::mesh::{triangle_normal, MeshData};

/// Quantization step for normal-equivalence grouping. Empirically tuned:
/// the closest distinct-face normals of any supported solid (adjacent d20
/// faces, ~41.8 degrees apart) sit far outside this step, while coplanar
/// triangles from the same builder agree to ~1e-7.
const NORMAL_TOLERANCE: f32 = 1e-3;

/// Ring vertices of the trapezohedron builder are indices `0..10`; the two
/// pole vertices come after.
const RING: u32 = 10;

/// One physical (printed) face of a die.
#[derive(Debug, Clone)]
pub struct FaceGroup {
    /// Outward unit normal.
    pub normal: Vec3,
    /// Area-unweighted average of the constituent triangles' vertices.
    pub centroid: Vec3,
    /// Indices of the triangles composing this face.
    pub triangles: Vec<usize>,
}

#[derive(Default)]
struct GroupBuilder {
    normal_sum: Vec3,
    vertex_sum: Vec3,
    vertex_count: u32,
    triangles: Vec<usize>,
}

impl GroupBuilder {
    fn add(&mut self, tri: usize, corners: [Vec3; 3]) {
        let [a, b, c] = corners;
        self.normal_sum += triangle_normal(a, b, c);
        self.vertex_sum += a + b + c;
        self.vertex_count += 3;
        self.triangles.push(tri);
    }

    fn finish(self, orient_outward: bool) -> FaceGroup {
        let centroid = self.vertex_sum / self.vertex_count as f32;
        let mut normal = self.normal_sum.normalize_or_zero();
        if orient_outward && normal.dot(centroid) < 0.0 {
            normal = -normal;
        }
        FaceGroup {
            normal,
            centroid,
            triangles: self.triangles,
        }
    }
}

/// Group triangles by quantized-normal equivalence, in first-encounter
/// order. Assumes the builder already emits outward winding; no sign
/// correction is applied here.
pub fn group_by_normal(mesh: &MeshData) -> Result<Vec<FaceGroup>, GeometryError> {
    let flat = mesh.triangle_indices()?;
    let mut builders: IndexMap<(i32, i32, i32), GroupBuilder> = IndexMap::new();

    for tri in 0..flat.len() / 3 {
        let corners = mesh.triangle(&flat, tri);
        let [a, b, c] = corners;
        let n = triangle_normal(a, b, c);
        let q = |component: f32| (component / NORMAL_TOLERANCE).round() as i32;
        builders
            .entry((q(n.x), q(n.y), q(n.z)))
            .or_default()
            .add(tri, corners);
    }

    let groups: Vec<FaceGroup> = builders.into_values().map(|b| b.finish(false)).collect();
    debug!(groups = groups.len(), "grouped faces by normal");
    Ok(groups)
}

/// Group the 20 triangles of the pentagonal trapezohedron into its 10 kite
/// faces.
///
/// Pass 1 keys every apex triangle (the ones touching a pole vertex, which
/// carry the printed numerals) by the sorted pair of ring vertices on the
/// kite's long diagonal. Pass 2 attaches each belt triangle through its one
/// edge whose ring indices differ by exactly 2 (mod 10); that edge is the
/// shared diagonal. Group normals are re-oriented outward here rather than
/// relying on upstream winding correction.
pub fn group_kite_faces(mesh: &MeshData) -> Result<Vec<FaceGroup>, GeometryError> {
    let flat = mesh.triangle_indices()?;
    let triangle_count = flat.len() / 3;
    if triangle_count != 20 {
        return Err(GeometryError::KiteTriangleCount(triangle_count));
    }

    let mut builders: IndexMap<(u32, u32), GroupBuilder> = IndexMap::new();
    let mut belts: Vec<usize> = Vec::new();

    for tri in 0..triangle_count {
        let idx = [flat[tri * 3], flat[tri * 3 + 1], flat[tri * 3 + 2]];
        if idx.iter().all(|&i| i < RING) {
            belts.push(tri);
            continue;
        }
        let ring: Vec<u32> = idx.iter().copied().filter(|&i| i < RING).collect();
        let &[p, q] = ring.as_slice() else {
            return Err(GeometryError::OrphanBeltTriangle(tri));
        };
        builders
            .entry((p.min(q), p.max(q)))
            .or_default()
            .add(tri, mesh.triangle(&flat, tri));
    }

    for tri in belts {
        let idx = [flat[tri * 3], flat[tri * 3 + 1], flat[tri * 3 + 2]];
        let diagonal = [(0, 1), (1, 2), (2, 0)].into_iter().find_map(|(i, j)| {
            let (p, q) = (idx[i], idx[j]);
            let step = (p + RING - q) % RING;
            (step == 2 || step == 8).then(|| (p.min(q), p.max(q)))
        });
        let joined = diagonal
            .and_then(|key| builders.get_mut(&key))
            .ok_or(GeometryError::OrphanBeltTriangle(tri))?;
        joined.add(tri, mesh.triangle(&flat, tri));
    }

    let groups: Vec<FaceGroup> = builders.into_values().map(|b| b.finish(true)).collect();
    debug!(groups = groups.len(), "grouped trapezohedron kites");
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cube_groups_into_six_faces_of_two_triangles() {
        let groups = group_by_normal(&crate::meshes::d6::build().unwrap()).unwrap();
        assert_eq!(groups.len(), 6);
        for group in &groups {
            assert_eq!(group.triangles.len(), 2);
            assert_relative_eq!(group.normal.length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn group_order_follows_first_encountered_triangle() {
        let groups = group_by_normal(&crate::meshes::d6::build().unwrap()).unwrap();
        // The first group owns triangle 0, the second the first triangle
        // not in group 0, and so on.
        assert_eq!(groups[0].triangles[0], 0);
        let mut next_unclaimed = 0;
        for group in &groups {
            assert_eq!(group.triangles[0], next_unclaimed);
            next_unclaimed = group.triangles.iter().max().unwrap() + 1;
        }
    }

    #[test]
    fn kite_grouping_rejects_wrong_triangle_count() {
        let result = group_kite_faces(&crate::meshes::d6::build().unwrap());
        assert_eq!(result.unwrap_err(), GeometryError::KiteTriangleCount(12));
    }

    #[test]
    fn kite_groups_pair_one_apex_with_one_belt_triangle() {
        let groups = group_kite_faces(&crate::meshes::d10::build().unwrap()).unwrap();
        assert_eq!(groups.len(), 10);
        let total: usize = groups.iter().map(|g| g.triangles.len()).sum();
        assert_eq!(total, 20);
        for group in &groups {
            assert_eq!(group.triangles.len(), 2);
        }
    }

    #[test]
    fn kite_normals_point_outward() {
        let groups = group_kite_faces(&crate::meshes::d10::build().unwrap()).unwrap();
        for group in &groups {
            assert!(group.normal.dot(group.centroid) > 0.0);
            assert_relative_eq!(group.normal.length(), 1.0, epsilon = 1e-5);
        }
    }
}
