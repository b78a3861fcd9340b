//! Error taxonomy for die construction and settings persistence.

use thiserror::Error;

/// Structural mesh errors.
///
/// All of these indicate a corrupt or mismatched geometry generator and are
/// fatal to the die-construction path; nothing here is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("mesh has no position data")]
    MissingPositions,

    #[error("triangle index count {0} is not a multiple of 3")]
    RaggedIndices(usize),

    #[error("vertex index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },

    #[error("pentagonal trapezohedron expects exactly 20 triangles, got {0}")]
    KiteTriangleCount(usize),

    #[error("belt triangle {0} has no diagonal edge shared with a numbered face")]
    OrphanBeltTriangle(usize),
}

/// Errors loading or saving the persisted user settings blob.
///
/// Field validation is deliberately not represented here: malformed user
/// input surfaces as inline messages, never as an `Err` (see
/// [`crate::settings::UserSettings::validate`]).
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings blob is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}
