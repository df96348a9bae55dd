//! Field errors.

use pc_core::PatchId;
use thiserror::Error;

pub type FieldResult<T> = Result<T, FieldError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Field '{field}' has {actual} {what} values, mesh has {expected}")]
    SizeMismatch {
        field: String,
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Face {face} out of range (mesh has {n_faces} faces)")]
    FaceOutOfRange { face: usize, n_faces: usize },

    #[error("Field '{field}' has no value for face {face} ({n_values} values)")]
    NoFaceValue {
        field: String,
        face: usize,
        n_values: usize,
    },

    #[error("Field '{field}' has no values for patch {patch}")]
    MissingPatchValues { field: String, patch: PatchId },

    #[error("Face {face} is neither internal nor on a patch")]
    UnpatchedFace { face: usize },
}
