//! Fixed-step host loop driving a function object list.

use std::path::Path;

use pc_fields::FieldLookup;
use pc_mesh::{MeshAccess, MeshMap};
use tracing::{debug, info};

use crate::error::{RunError, RunResult};
use crate::list::FunctionObjectList;
use crate::registry::{ObjectRegistry, TimeState};

/// Mesh change reported by a case while advancing.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshEvent {
    /// Face/cell indices changed.
    TopologyChanged(MeshMap),
    /// Points moved, topology unchanged.
    PointsMoved,
}

/// A running simulation as seen by the host loop.
pub trait Case {
    /// Root directory for `postProcessing` output.
    fn case_dir(&self) -> &Path;

    fn mesh(&self) -> &dyn MeshAccess;

    fn fields(&self) -> &dyn FieldLookup;

    /// Advance the solution to `time`, reporting any mesh changes made on the way.
    fn advance(&mut self, time: &TimeState) -> RunResult<Vec<MeshEvent>>;
}

/// Borrow the case's state for one hook call.
pub fn object_registry<'a, C: Case + ?Sized>(case: &'a C, time: &'a TimeState) -> ObjectRegistry<'a> {
    ObjectRegistry::new(time, case.mesh(), case.fields(), case.case_dir())
}

/// Options for `run_case`.
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Start time (seconds)
    pub t_start: f64,
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Final time (seconds)
    pub t_end: f64,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            t_start: 0.0,
            dt: 1e-3,
            t_end: 1.0,
            max_steps: 100_000,
        }
    }
}

impl RunOptions {
    pub fn validate(&self) -> RunResult<()> {
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(RunError::InvalidArg {
                what: "dt must be positive and finite",
            });
        }
        if !(self.t_start.is_finite() && self.t_end.is_finite()) {
            return Err(RunError::InvalidArg {
                what: "start and end times must be finite",
            });
        }
        if self.t_end < self.t_start {
            return Err(RunError::InvalidArg {
                what: "t_end must not precede t_start",
            });
        }
        if self.max_steps == 0 {
            return Err(RunError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        Ok(())
    }

    /// Clock positioned at the start time.
    pub fn initial_time(&self) -> TimeState {
        TimeState::new(self.t_start, self.dt)
    }
}

/// What a run did.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub t_final: f64,
    pub topology_changes: usize,
    pub point_motions: usize,
}

/// Step `case` from `t_start` to `t_end`, driving `functions` at every step.
///
/// Per step: advance the clock, advance the case, forward mesh events, then
/// `execute`, `time_set` and `write`. `end` is called once after the last step.
pub fn run_case<C: Case + ?Sized>(
    case: &mut C,
    functions: &mut FunctionObjectList,
    opts: &RunOptions,
) -> RunResult<RunSummary> {
    opts.validate()?;

    let mut time = opts.initial_time();
    let mut summary = RunSummary {
        steps: 0,
        t_final: time.value(),
        topology_changes: 0,
        point_motions: 0,
    };

    // Stop within half a step of t_end so rounding cannot add a step.
    let t_stop = opts.t_end - 0.5 * opts.dt;
    while time.value() < t_stop && summary.steps < opts.max_steps {
        time.advance();
        for event in case.advance(&time)? {
            match event {
                MeshEvent::TopologyChanged(map) => {
                    summary.topology_changes += 1;
                    functions.update_mesh(&map);
                }
                MeshEvent::PointsMoved => {
                    summary.point_motions += 1;
                    functions.move_points(case.mesh());
                }
            }
        }

        let obr = object_registry(&*case, &time);
        functions.execute(obr);
        functions.time_set(obr);
        functions.write(obr);
        summary.steps += 1;
        debug!(step = time.index(), time = time.value(), "step complete");
    }

    functions.end(object_registry(&*case, &time));
    summary.t_final = time.value();
    info!(
        steps = summary.steps,
        t_final = summary.t_final,
        topology_changes = summary.topology_changes,
        "run finished"
    );
    Ok(summary)
}
