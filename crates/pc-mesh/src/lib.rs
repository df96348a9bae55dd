//! pc-mesh: unstructured polyhedral mesh for pipecalc.
//!
//! Provides:
//! - `MeshAccess`, the read-only interface diagnostics consume
//! - `PolyMesh` (points, faces, owner/neighbour, patches, face zones, cached geometry)
//! - Incremental `MeshBuilder` with validation
//! - `MeshMap`, the payload handed to observers after a topology change
//! - A block generator for rectangular ducts with a cross-section zone
//!
//! Face ordering follows the usual finite-volume convention: internal faces
//! come first (`0..n_internal_faces()`), boundary faces follow patch by patch.
//! Face area vectors point from owner to neighbour, and out of the domain on
//! boundary faces.
//!
//! # Example
//!
//! ```
//! use pc_mesh::generation::{CrossSection, DuctSpec, duct};
//! use pc_mesh::MeshAccess;
//!
//! let spec = DuctSpec {
//!     cells: [4, 2, 2],
//!     size: [4.0, 1.0, 1.0],
//!     cross_section: Some(CrossSection::new("cut", 2)),
//! };
//! let mesh = duct(&spec).unwrap();
//! let zone = mesh.find_face_zone("cut").unwrap();
//! assert_eq!(mesh.face_zone(zone).unwrap().len(), 4);
//! ```

pub mod builder;
pub mod error;
pub mod generation;
pub mod mapping;
pub mod mesh;
pub mod traits;
pub mod zone;
pub(crate) mod validate;

pub use builder::MeshBuilder;
pub use error::{MeshError, MeshResult};
pub use mapping::MeshMap;
pub use mesh::{BoundaryPatch, PolyMesh};
pub use traits::MeshAccess;
pub use zone::FaceZone;
