//! pc-fields: named vector fields on a `pc-mesh` mesh.
//!
//! Provides:
//! - Cell-centred (`VolVectorField`) and face-centred (`SurfaceVectorField`) vector fields
//! - `FieldLookup`, the by-name registry interface diagnostics consume
//! - `FieldRegistry`, an in-memory implementation
//! - Linear owner/neighbour interpolation of cell values to faces

pub mod error;
pub mod field;
pub mod interpolate;
pub mod registry;

pub use error::{FieldError, FieldResult};
pub use field::{FieldKind, SurfaceVectorField, VectorField, VolVectorField};
pub use interpolate::{face_value, linear_weight};
pub use registry::{FieldLookup, FieldRegistry};
