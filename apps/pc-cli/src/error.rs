//! Error type for the command-line front end.

use std::path::PathBuf;

use pc_function_objects::{FunctionObjectError, RunError};
use pc_mesh::MeshError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read case file: {path}")]
    CaseFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse case file {path}: {source}")]
    CaseFileParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid case: {0}")]
    InvalidCase(String),

    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    #[error("Function object error: {0}")]
    FunctionObject(#[from] FunctionObjectError),

    #[error("Run error: {0}")]
    Run(#[from] RunError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
