//! pc-core: shared foundation for pipecalc.
//!
//! Contains:
//! - units (uom SI types + constructors for the reported quantities)
//! - numeric (Real, Vector, tolerances, float helpers)
//! - ids (compact ids for mesh-side handles: zones, patches, builder faces)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{PcError, PcResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
