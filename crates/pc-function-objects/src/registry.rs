//! Host state handed to function objects on every hook.

use std::path::Path;

use pc_core::{Real, Time, s};
use pc_fields::FieldLookup;
use pc_mesh::MeshAccess;

/// Fixed-step simulation clock.
///
/// Time values are computed as `start + index * dt` rather than accumulated,
/// so the same step always reports the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeState {
    start: Real,
    dt: Real,
    index: usize,
}

impl TimeState {
    pub fn new(start: Real, dt: Real) -> Self {
        Self { start, dt, index: 0 }
    }

    /// Move to the next step.
    pub fn advance(&mut self) {
        self.index += 1;
    }

    pub fn value(&self) -> Real {
        self.start + self.index as Real * self.dt
    }

    pub fn time(&self) -> Time {
        s(self.value())
    }

    /// Steps taken since the start time.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn dt(&self) -> Real {
        self.dt
    }

    pub fn start_value(&self) -> Real {
        self.start
    }

    /// Current time formatted as a directory-style name.
    pub fn name(&self) -> String {
        time_name(self.value())
    }

    /// Start time formatted as a directory-style name.
    pub fn start_name(&self) -> String {
        time_name(self.start)
    }
}

/// Shortest decimal form of a time value: `0`, `0.5`, `1.25`, ...
pub fn time_name(value: Real) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let text = format!("{value:.9}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" || text.is_empty() {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Borrowed view of everything a function object may read during one hook.
#[derive(Clone, Copy)]
pub struct ObjectRegistry<'a> {
    time: &'a TimeState,
    mesh: &'a dyn MeshAccess,
    fields: &'a dyn FieldLookup,
    case_dir: &'a Path,
}

impl<'a> ObjectRegistry<'a> {
    pub fn new(
        time: &'a TimeState,
        mesh: &'a dyn MeshAccess,
        fields: &'a dyn FieldLookup,
        case_dir: &'a Path,
    ) -> Self {
        Self {
            time,
            mesh,
            fields,
            case_dir,
        }
    }

    pub fn time(&self) -> &'a TimeState {
        self.time
    }

    pub fn mesh(&self) -> &'a dyn MeshAccess {
        self.mesh
    }

    pub fn fields(&self) -> &'a dyn FieldLookup {
        self.fields
    }

    pub fn case_dir(&self) -> &'a Path {
        self.case_dir
    }
}

impl std::fmt::Debug for ObjectRegistry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("time", &self.time.value())
            .field("n_faces", &self.mesh.n_faces())
            .field("case_dir", &self.case_dir)
            .finish()
    }
}
