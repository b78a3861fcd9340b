//! Dicetray: the face-mapping and result-detection engine behind a
//! multiplayer, physically simulated 3D dice tray.
//!
//! The crate derives collision hulls and physical (printed) faces from die
//! meshes, assigns a deterministic face-to-value labeling per die kind,
//! including the two-piece percentile composite, and watches a settling
//! rigid body's orientation to decide which face is resting upward and
//! what number was rolled. Rendering, rigid-body dynamics, and network
//! transport are external collaborators; their contracts live in
//! [`physics`] and [`room`].

pub mod dice;
pub mod error;
pub mod geometry;
pub mod meshes;
pub mod physics;
pub mod room;
pub mod settings;
pub mod settle;
pub mod tray;

pub use dice::{percentile_total, DieAssets, DieKind, DieSpec, PhysicalDie, ReadMode};
pub use error::{GeometryError, SettingsError};
pub use geometry::{ConvexArgs, FaceGroup, MeshData};
pub use physics::{BodySample, DieBody};
pub use settle::{SettleConfig, SettleDetector, SettlePhase};
pub use tray::{DieId, DiePlan, Selection, Tray, TrayPhase};
