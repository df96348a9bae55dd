//! Mesh construction and mutation errors.

use pc_core::{FaceId, PatchId};
use thiserror::Error;

pub type MeshResult<T> = Result<T, MeshError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A face refers to a point that doesn't exist.
    #[error("Face {face} refers to non-existent point {point}")]
    InvalidPointRef { face: FaceId, point: usize },

    /// A face refers to a cell that doesn't exist.
    #[error("Face {face} refers to non-existent cell {cell}")]
    InvalidCellRef { face: FaceId, cell: usize },

    /// An internal face has the same cell on both sides.
    #[error("Face {face} has cell {cell} as both owner and neighbour")]
    SelfNeighbour { face: FaceId, cell: usize },

    /// A face has fewer than three points.
    #[error("Face {face} has {count} points (expected at least 3)")]
    DegenerateFace { face: FaceId, count: usize },

    #[error("Duplicate {what} name: {name}")]
    DuplicateName { what: &'static str, name: String },

    #[error("Unknown patch {0}")]
    UnknownPatch(PatchId),

    #[error("Face zone '{zone}' refers to unknown face {face}")]
    InvalidZoneFace { zone: String, face: FaceId },

    #[error("Face zone '{zone}' lists face {face} more than once")]
    DuplicateZoneFace { zone: String, face: usize },

    #[error("Point count mismatch: expected {expected}, got {actual}")]
    PointCountMismatch { expected: usize, actual: usize },

    #[error("Invalid face renumbering: {what}")]
    InvalidRenumbering { what: &'static str },

    #[error("Invalid block specification: {what}")]
    InvalidBlock { what: &'static str },
}
