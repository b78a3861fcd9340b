//! Mesh-level building blocks: the triangle-mesh data model, convex-hull
//! extraction for the physics engine, and physical-face grouping.

pub mod faces;
pub mod hull;
pub mod mesh;

pub use faces::{group_by_normal, group_kite_faces, FaceGroup};
pub use hull::{convex_args, ConvexArgs};
pub use mesh::{triangle_normal, MeshData};
