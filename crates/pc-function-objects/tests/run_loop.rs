//! Host loop and function object list driving pipeCalc instances.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use pc_core::vector;
use pc_fields::{FieldLookup, FieldRegistry, VolVectorField};
use pc_function_objects::run::object_registry;
use pc_function_objects::{
    Case, Dictionary, FunctionObjectError, FunctionObjectList, MeshEvent, RunError, RunOptions,
    RunResult, TimeState, run_case,
};
use pc_mesh::generation::{CrossSection, DuctSpec, duct};
use pc_mesh::{MeshAccess, MeshMap, PolyMesh};

static CASE_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_case(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "pc_run_loop_{}_{}_{}",
        label,
        std::process::id(),
        CASE_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}

/// Duct with plug flow whose speed equals the current time; refines once at `refine_at`.
struct PlugFlowDuct {
    dir: PathBuf,
    spec: DuctSpec,
    mesh: PolyMesh,
    fields: FieldRegistry,
    refine_at: Option<usize>,
}

impl PlugFlowDuct {
    fn new(dir: PathBuf, refine_at: Option<usize>) -> Self {
        let spec = DuctSpec {
            cells: [4, 2, 2],
            size: [4.0, 1.0, 1.0],
            cross_section: Some(CrossSection::new("cut", 2)),
        };
        let mesh = duct(&spec).unwrap();
        let mut fields = FieldRegistry::new();
        fields.insert(VolVectorField::uniform("U", &mesh, vector(0.0, 0.0, 0.0)));
        Self {
            dir,
            spec,
            mesh,
            fields,
            refine_at,
        }
    }
}

impl Case for PlugFlowDuct {
    fn case_dir(&self) -> &Path {
        &self.dir
    }

    fn mesh(&self) -> &dyn MeshAccess {
        &self.mesh
    }

    fn fields(&self) -> &dyn FieldLookup {
        &self.fields
    }

    fn advance(&mut self, time: &TimeState) -> RunResult<Vec<MeshEvent>> {
        let mut events = Vec::new();
        if self.refine_at == Some(time.index()) {
            let spec = self.spec.refined(2);
            let fine = duct(&spec)?;
            events.push(MeshEvent::TopologyChanged(MeshMap::regenerated(&self.mesh, &fine)));
            self.spec = spec;
            self.mesh = fine;
        }
        let u = vector(time.value(), 0.0, 0.0);
        self.fields.insert(VolVectorField::uniform("U", &self.mesh, u));
        Ok(events)
    }
}

const FUNCTIONS: &str = "
everyStep:
  type: pipeCalc
  faceZone: cut
  log: false
everyOther:
  type: pipeCalc
  faceZone: cut
  writeInterval: 2
";

fn rows(path: &Path) -> Vec<Vec<f64>> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.starts_with('#'))
        .map(|l| l.split('\t').map(|v| v.parse().unwrap()).collect())
        .collect()
}

fn build_list(case: &PlugFlowDuct, opts: &RunOptions, text: &str) -> FunctionObjectList {
    let functions = Dictionary::from_yaml_str("functions", text).unwrap();
    let time = opts.initial_time();
    FunctionObjectList::from_dict(object_registry(case, &time), &functions, false).unwrap()
}

#[test]
fn list_is_built_in_dictionary_order() {
    let dir = temp_case("order");
    let case = PlugFlowDuct::new(dir.clone(), None);
    let list = build_list(&case, &RunOptions::default(), FUNCTIONS);
    assert_eq!(list.names().collect::<Vec<_>>(), vec!["everyStep", "everyOther"]);
    assert_eq!(list.get("everyOther").unwrap().type_name(), "pipeCalc");
    assert_eq!(
        list.output_files(),
        vec![
            dir.join("postProcessing/everyStep/0/everyStep.dat"),
            dir.join("postProcessing/everyOther/0/everyOther.dat"),
        ]
    );
}

#[test]
fn unknown_type_is_rejected() {
    let case = PlugFlowDuct::new(temp_case("unknown"), None);
    let functions = Dictionary::from_yaml_str("functions", "probe:\n  type: probes\n").unwrap();
    let time = TimeState::new(0.0, 0.1);
    match FunctionObjectList::from_dict(object_registry(&case, &time), &functions, false) {
        Err(FunctionObjectError::UnknownType { name, type_name }) => {
            assert_eq!(name, "probe");
            assert_eq!(type_name, "probes");
        }
        Err(other) => panic!("expected UnknownType, got {other:?}"),
        Ok(_) => panic!("expected UnknownType"),
    }
}

#[test]
fn run_writes_every_step_and_honours_write_interval() {
    let dir = temp_case("interval");
    let mut case = PlugFlowDuct::new(dir.clone(), None);
    let opts = RunOptions {
        t_start: 0.0,
        dt: 0.25,
        t_end: 1.0,
        max_steps: 100,
    };
    let mut list = build_list(&case, &opts, FUNCTIONS);

    let summary = run_case(&mut case, &mut list, &opts).unwrap();
    assert_eq!(summary.steps, 4);
    assert_eq!(summary.t_final, 1.0);
    assert_eq!(summary.topology_changes, 0);

    let every = rows(&dir.join("postProcessing/everyStep/0/everyStep.dat"));
    let times: Vec<f64> = every.iter().map(|r| r[0]).collect();
    assert_eq!(times, vec![0.25, 0.5, 0.75, 1.0]);
    for row in &every {
        // Section area is 1, so flow rate and mean velocity both equal the time.
        assert!((row[1] - row[0]).abs() < 1e-9);
        assert!((row[2] - row[0]).abs() < 1e-9);
        assert!((row[3] - 1.0).abs() < 1e-9);
    }

    let other = rows(&dir.join("postProcessing/everyOther/0/everyOther.dat"));
    assert_eq!(other.iter().map(|r| r[0]).collect::<Vec<_>>(), vec![0.5, 1.0]);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn refinement_mid_run_is_forwarded() {
    let dir = temp_case("refine");
    let mut case = PlugFlowDuct::new(dir.clone(), Some(2));
    let opts = RunOptions {
        t_start: 0.0,
        dt: 0.5,
        t_end: 2.0,
        max_steps: 100,
    };
    let mut list = build_list(&case, &opts, "pipe:\n  type: pipeCalc\n  faceZone: cut\n");
    let n_faces_before = case.mesh().n_faces();

    let summary = run_case(&mut case, &mut list, &opts).unwrap();
    assert_eq!(summary.topology_changes, 1);
    assert!(case.mesh().n_faces() > n_faces_before);

    let rows = rows(&dir.join("postProcessing/pipe/0/pipe.dat"));
    assert_eq!(rows.len(), 4);
    for row in &rows {
        assert!((row[1] - row[0]).abs() < 1e-9);
        assert!((row[3] - 1.0).abs() < 1e-9);
    }
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn restarted_run_uses_its_start_time_directory() {
    let dir = temp_case("restart");
    let mut case = PlugFlowDuct::new(dir.clone(), None);
    let opts = RunOptions {
        t_start: 0.5,
        dt: 0.25,
        t_end: 1.0,
        max_steps: 100,
    };
    let mut list = build_list(&case, &opts, "pipe:\n  type: pipeCalc\n  faceZone: cut\n");
    run_case(&mut case, &mut list, &opts).unwrap();

    let rows = rows(&dir.join("postProcessing/pipe/0.5/pipe.dat"));
    assert_eq!(rows.iter().map(|r| r[0]).collect::<Vec<_>>(), vec![0.75, 1.0]);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn max_steps_caps_the_run() {
    let mut case = PlugFlowDuct::new(temp_case("cap"), None);
    let opts = RunOptions {
        t_start: 0.0,
        dt: 0.1,
        t_end: 10.0,
        max_steps: 3,
    };
    let mut list = FunctionObjectList::new();
    let summary = run_case(&mut case, &mut list, &opts).unwrap();
    assert_eq!(summary.steps, 3);
    assert!((summary.t_final - 0.3).abs() < 1e-12);
}

#[test]
fn invalid_options_fail_before_stepping() {
    let mut case = PlugFlowDuct::new(temp_case("invalid"), None);
    let mut list = FunctionObjectList::new();
    let opts = RunOptions {
        dt: -1.0,
        ..RunOptions::default()
    };
    assert!(matches!(
        run_case(&mut case, &mut list, &opts),
        Err(RunError::InvalidArg { .. })
    ));
}
