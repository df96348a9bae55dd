//! pc-function-objects: per-step diagnostics driven by a host time loop.
//!
//! Contains:
//! - `FunctionObject`, the hook interface, and `FunctionObjectList`, the host registry
//! - `PipeCalc`, the face-zone flow rate diagnostic, and its building blocks
//!   (`ZoneFaceIndexSet`, `FieldSampler`, `calculator::reduce`, `TimeSeriesWriter`)
//! - `Dictionary` configuration (YAML / JSON)
//! - `ObjectRegistry` / `TimeState`, the borrowed host state passed to each hook
//! - `run_case`, a fixed-step host loop over any `Case`

pub mod calculator;
pub mod dictionary;
pub mod error;
pub mod function_object;
pub mod list;
pub mod output;
pub mod pipe_calc;
pub mod registry;
pub mod run;
pub mod sampler;
pub mod zone_faces;

pub use calculator::{DiagnosticRecord, reduce};
pub use dictionary::Dictionary;
pub use error::{FunctionObjectError, FunctionObjectResult, RunError, RunResult};
pub use function_object::FunctionObject;
pub use list::FunctionObjectList;
pub use output::{OutputFile, TimeSeriesWriter};
pub use pipe_calc::{InactiveReason, LifecycleState, PipeCalc, PipeCalcConfig};
pub use registry::{ObjectRegistry, TimeState};
pub use run::{Case, MeshEvent, RunOptions, RunSummary, run_case};
pub use sampler::FieldSampler;
pub use zone_faces::{OrientedFace, Sign, ZoneFaceIndexSet};
