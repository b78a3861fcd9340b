//! Canonical die geometry, one builder per solid.
//!
//! Every builder produces an unscaled mesh centered at the origin with
//! circumradius 1 (the squashed d10 excepted, by construction). Triangle
//! tables are hand-specified, so each builder runs the outward-winding
//! pass before handing the mesh out; correction preserves triangle order,
//! which face labeling depends on.

pub mod d10;
pub mod d12;
pub mod d20;
pub mod d4;
pub mod d6;
pub mod d8;

use crate::error::GeometryError;
use crate::geometry::MeshData;

pub(crate) fn outward(mut mesh: MeshData) -> Result<MeshData, GeometryError> {
    mesh.correct_winding()?;
    Ok(mesh)
}
