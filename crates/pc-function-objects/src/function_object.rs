//! The hook interface the host time loop drives.

use std::path::PathBuf;

use pc_mesh::{MeshAccess, MeshMap};

use crate::dictionary::Dictionary;
use crate::error::FunctionObjectResult;
use crate::registry::ObjectRegistry;

/// A diagnostic attachment driven by the host time loop.
///
/// Per step the host calls `execute`, `time_set` and `write` in that order;
/// `update_mesh` / `move_points` arrive between steps and `end` after the
/// last one. The mesh and fields are only borrowed for the duration of a hook.
///
/// Per-step hooks do not return errors: implementations degrade (skip the
/// step, go inactive) and log instead of stopping the run.
pub trait FunctionObject {
    /// Instance name, unique within a `FunctionObjectList`.
    fn name(&self) -> &str;

    /// Registered type keyword (e.g. `pipeCalc`).
    fn type_name(&self) -> &'static str;

    /// Re-read the configuration.
    ///
    /// Only malformed configuration is an error; runtime problems such as an
    /// unknown zone put the object into an inactive state instead.
    fn read(&mut self, obr: ObjectRegistry<'_>, dict: &Dictionary) -> FunctionObjectResult<()>;

    fn execute(&mut self, obr: ObjectRegistry<'_>);

    /// Called when the host changes the current time.
    fn time_set(&mut self, _obr: ObjectRegistry<'_>) {}

    /// Compute and persist this step's output.
    fn write(&mut self, obr: ObjectRegistry<'_>);

    /// Called once after the last step.
    fn end(&mut self, _obr: ObjectRegistry<'_>) {}

    /// Face and cell indices changed.
    fn update_mesh(&mut self, map: &MeshMap);

    /// Point positions changed; topology did not.
    fn move_points(&mut self, mesh: &dyn MeshAccess);

    /// Files this object writes to.
    fn output_files(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}
