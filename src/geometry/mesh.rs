//! Triangle-mesh data model shared by every die builder.
//!
//! A [`MeshData`] is the canonical exchange format between the geometry
//! builders, the convex-hull extractor, the face-grouping engine, and the
//! settle detector: an ordered vertex-position list plus an optional
//! triangle index list. Winding order determines the outward-facing normal.

use glam::Vec3;

use crate::error::GeometryError;

/// An ordered sequence of vertex positions plus an optional triangle index.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    positions: Vec<Vec3>,
    indices: Option<Vec<u32>>,
}

impl MeshData {
    pub fn new(positions: Vec<Vec3>, indices: Option<Vec<u32>>) -> Self {
        Self { positions, indices }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Flat triangle index list of length `3 * triangle_count`.
    ///
    /// An un-indexed mesh is treated as triangle soup whose vertex stream is
    /// already triangle-ordered, so the identity sequence is synthesized.
    pub fn triangle_indices(&self) -> Result<Vec<u32>, GeometryError> {
        if self.positions.is_empty() {
            return Err(GeometryError::MissingPositions);
        }
        let flat = match &self.indices {
            Some(indices) => indices.clone(),
            None => (0..self.positions.len() as u32).collect(),
        };
        if flat.len() % 3 != 0 {
            return Err(GeometryError::RaggedIndices(flat.len()));
        }
        if let Some(&index) = flat.iter().find(|&&i| i as usize >= self.positions.len()) {
            return Err(GeometryError::IndexOutOfBounds {
                index,
                vertex_count: self.positions.len(),
            });
        }
        Ok(flat)
    }

    pub fn triangle_count(&self) -> Result<usize, GeometryError> {
        Ok(self.triangle_indices()?.len() / 3)
    }

    /// The three corner positions of triangle `tri` in a flat index list.
    pub(crate) fn triangle(&self, flat: &[u32], tri: usize) -> [Vec3; 3] {
        [
            self.positions[flat[tri * 3] as usize],
            self.positions[flat[tri * 3 + 1] as usize],
            self.positions[flat[tri * 3 + 2] as usize],
        ]
    }

    /// Uniformly scaled copy. The physics hull and the visual mesh must both
    /// be derived from the same scaled instance.
    pub fn scaled(&self, factor: f32) -> MeshData {
        MeshData {
            positions: self.positions.iter().map(|p| *p * factor).collect(),
            indices: self.indices.clone(),
        }
    }

    /// Flip inward-wound triangles so every normal points away from the
    /// origin. Valid only for convex, origin-centered geometry; both are
    /// invariants of every die's canonical mesh.
    pub fn correct_winding(&mut self) -> Result<(), GeometryError> {
        let mut flat = self.triangle_indices()?;
        for tri in 0..flat.len() / 3 {
            let [a, b, c] = self.triangle(&flat, tri);
            let normal = triangle_normal(a, b, c);
            let center = (a + b + c) / 3.0;
            if normal.dot(center) < 0.0 {
                flat.swap(tri * 3 + 1, tri * 3 + 2);
            }
        }
        self.indices = Some(flat);
        Ok(())
    }
}

/// Outward normal of a counter-clockwise-wound triangle.
pub fn triangle_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (c - b).cross(a - b).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soup() -> MeshData {
        MeshData::new(
            vec![
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(0.0, 1.0, 1.0),
            ],
            None,
        )
    }

    #[test]
    fn unindexed_mesh_synthesizes_identity_index() {
        assert_eq!(soup().triangle_indices().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let mesh = MeshData::new(Vec::new(), None);
        assert_eq!(
            mesh.triangle_indices(),
            Err(GeometryError::MissingPositions)
        );
    }

    #[test]
    fn ragged_index_is_rejected() {
        let mut mesh = soup();
        mesh.indices = Some(vec![0, 1]);
        assert_eq!(mesh.triangle_indices(), Err(GeometryError::RaggedIndices(2)));
    }

    #[test]
    fn out_of_bounds_index_is_rejected() {
        let mut mesh = soup();
        mesh.indices = Some(vec![0, 1, 7]);
        assert_eq!(
            mesh.triangle_indices(),
            Err(GeometryError::IndexOutOfBounds {
                index: 7,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn winding_correction_flips_inward_triangles() {
        // Triangle at z = 1 wound so its normal faces the origin.
        let mut mesh = MeshData::new(
            vec![
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 1.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
            ],
            None,
        );
        mesh.correct_winding().unwrap();
        let flat = mesh.triangle_indices().unwrap();
        let [a, b, c] = mesh.triangle(&flat, 0);
        assert!(triangle_normal(a, b, c).z > 0.0);
    }
}
