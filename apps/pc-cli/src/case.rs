//! Case file schema and the duct case it describes.

use std::path::{Path, PathBuf};

use pc_core::{Real, Vector, vector};
use pc_fields::{FieldLookup, FieldRegistry, SurfaceVectorField, VolVectorField};
use pc_function_objects::{Case, Dictionary, MeshEvent, RunOptions, RunResult, TimeState};
use pc_mesh::generation::{CrossSection, DuctSpec, duct};
use pc_mesh::{MeshAccess, MeshMap, PolyMesh};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseDef {
    pub mesh: MeshDef,
    pub velocity: VelocityDef,
    pub time: TimeDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refine: Option<RefineDef>,
    #[serde(default)]
    pub functions: serde_yaml::Mapping,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeshDef {
    pub cells: [usize; 3],
    pub size: [f64; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_section: Option<CrossSectionDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrossSectionDef {
    pub name: String,
    pub plane: usize,
    #[serde(default)]
    pub flip: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VelocityDef {
    #[serde(default = "default_velocity_field")]
    pub field: String,
    /// Store face values instead of cell values.
    #[serde(default)]
    pub surface: bool,
    pub profile: ProfileDef,
    /// Linear ramp-up time (s); full strength from then on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ramp: Option<f64>,
}

fn default_velocity_field() -> String {
    "U".to_string()
}

/// Axial (+x) velocity profile over the duct section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProfileDef {
    Uniform { mean: f64 },
    /// Product of parabolas in y and z, zero on the walls.
    Parabolic { mean: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeDef {
    #[serde(default)]
    pub start: f64,
    pub dt: f64,
    pub end: f64,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

fn default_max_steps() -> usize {
    100_000
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefineDef {
    /// Step index at which the mesh is regenerated.
    pub at_step: usize,
    pub factor: usize,
}

impl CaseDef {
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::CaseFileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let def: CaseDef = serde_yaml::from_str(&text).map_err(|source| CliError::CaseFileParse {
            path: path.to_path_buf(),
            source,
        })?;
        def.validate()?;
        Ok(def)
    }

    pub fn validate(&self) -> CliResult<()> {
        if let Some(refine) = &self.refine
            && refine.factor < 2
        {
            return Err(CliError::InvalidCase("refine.factor must be at least 2".into()));
        }
        let mean = match self.velocity.profile {
            ProfileDef::Uniform { mean } | ProfileDef::Parabolic { mean } => mean,
        };
        if !mean.is_finite() {
            return Err(CliError::InvalidCase("velocity.profile.mean must be finite".into()));
        }
        if let Some(ramp) = self.velocity.ramp
            && !(ramp > 0.0)
        {
            return Err(CliError::InvalidCase("velocity.ramp must be positive".into()));
        }
        Ok(())
    }

    pub fn duct_spec(&self) -> DuctSpec {
        DuctSpec {
            cells: self.mesh.cells,
            size: self.mesh.size,
            cross_section: self.mesh.cross_section.as_ref().map(|cs| {
                let section = CrossSection::new(cs.name.clone(), cs.plane);
                if cs.flip { section.flipped() } else { section }
            }),
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            t_start: self.time.start,
            dt: self.time.dt,
            t_end: self.time.end,
            max_steps: self.time.max_steps,
        }
    }

    pub fn functions(&self) -> CliResult<Dictionary> {
        Ok(Dictionary::from_value(
            "functions",
            serde_yaml::Value::Mapping(self.functions.clone()),
        )?)
    }
}

/// Generated duct with a prescribed, time-dependent velocity field.
pub struct DuctCase {
    dir: PathBuf,
    def: CaseDef,
    spec: DuctSpec,
    mesh: PolyMesh,
    fields: FieldRegistry,
}

impl DuctCase {
    pub fn new(def: CaseDef, dir: PathBuf) -> CliResult<Self> {
        let spec = def.duct_spec();
        let mesh = duct(&spec)?;
        let mut case = Self {
            dir,
            def,
            spec,
            mesh,
            fields: FieldRegistry::new(),
        };
        case.update_velocity(case.def.time.start);
        Ok(case)
    }

    pub fn polymesh(&self) -> &PolyMesh {
        &self.mesh
    }

    /// Velocity at a point and time.
    fn velocity(&self, p: &Vector, t: Real) -> Vector {
        let [_, ly, lz] = self.spec.size;
        let scale = match self.def.velocity.ramp {
            Some(ramp) => (t / ramp).clamp(0.0, 1.0),
            None => 1.0,
        };
        let axial = match self.def.velocity.profile {
            ProfileDef::Uniform { mean } => mean,
            ProfileDef::Parabolic { mean } => {
                // Each parabola averages 2/3 of its peak.
                let peak = mean * 9.0 / 4.0;
                let fy = 4.0 * p.y * (ly - p.y) / (ly * ly);
                let fz = 4.0 * p.z * (lz - p.z) / (lz * lz);
                peak * fy * fz
            }
        };
        vector(scale * axial, 0.0, 0.0)
    }

    fn update_velocity(&mut self, t: Real) {
        let name = self.def.velocity.field.clone();
        if self.def.velocity.surface {
            let field = SurfaceVectorField::from_fn(name, &self.mesh, |p| self.velocity(p, t));
            self.fields.insert(field);
        } else {
            let field = VolVectorField::from_fn(name, &self.mesh, |p| self.velocity(p, t));
            self.fields.insert(field);
        }
    }

    fn refine(&mut self, factor: usize) -> RunResult<MeshMap> {
        let spec = self.spec.refined(factor);
        let fine = duct(&spec)?;
        let map = MeshMap::regenerated(&self.mesh, &fine);
        info!(
            cells = fine.n_cells(),
            faces = fine.n_faces(),
            "refined mesh"
        );
        self.spec = spec;
        self.mesh = fine;
        Ok(map)
    }
}

impl Case for DuctCase {
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
        if let Some(refine) = self.def.refine.clone()
            && refine.at_step == time.index()
        {
            events.push(MeshEvent::TopologyChanged(self.refine(refine.factor)?));
        }
        self.update_velocity(time.value());
        Ok(events)
    }
}
