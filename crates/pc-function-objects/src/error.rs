//! Error types for function objects and the host loop.

use std::path::PathBuf;

use pc_core::PcError;
use pc_fields::FieldError;
use thiserror::Error;

pub type FunctionObjectResult<T> = Result<T, FunctionObjectError>;

/// Errors raised while configuring or evaluating a function object.
///
/// Only construction surfaces these to the host; per-step hooks log and degrade.
#[derive(Error, Debug)]
pub enum FunctionObjectError {
    #[error("Face zone '{zone}' not found")]
    ZoneNotFound { zone: String },

    #[error("Field '{field}' not found")]
    FieldNotFound { field: String },

    #[error("Face zone '{zone}' has zero total area")]
    DegenerateZone { zone: String },

    #[error("Cannot write {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing required entry '{key}' in dictionary '{dict}'")]
    MissingKey { key: String, dict: String },

    #[error("Invalid entry '{key}' in dictionary '{dict}': {message}")]
    InvalidEntry {
        key: String,
        dict: String,
        message: String,
    },

    #[error("Unknown function object type '{type_name}' for '{name}'")]
    UnknownType { name: String, type_name: String },

    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    #[error("Numeric error: {0}")]
    Numeric(#[from] PcError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RunResult<T> = Result<T, RunError>;

/// Errors that stop the host time loop.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Case error: {message}")]
    Case { message: String },

    #[error("Function object error: {0}")]
    FunctionObject(#[from] FunctionObjectError),
}

impl From<pc_mesh::MeshError> for RunError {
    fn from(e: pc_mesh::MeshError) -> Self {
        RunError::Case {
            message: e.to_string(),
        }
    }
}

impl From<FieldError> for RunError {
    fn from(e: FieldError) -> Self {
        RunError::Case {
            message: e.to_string(),
        }
    }
}
