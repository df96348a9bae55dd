//! `pipeCalc`: flow rate through a face zone.
//!
//! Samples a velocity field on the faces of a named zone and appends
//! `time, flowRate, meanVelocity, totalArea` to
//! `postProcessing/<name>/<start time>/<name>.dat` on every write.
//!
//! Configuration keys:
//! - `faceZone` (required): zone to integrate over
//! - `U` (default `U`): velocity field name
//! - `active` (default `true`)
//! - `log` (default `true`): also report the values through `tracing`

use std::path::{Path, PathBuf};

use pc_core::Vector;
use pc_mesh::{MeshAccess, MeshMap};
use tracing::{debug, info, trace, warn};

use crate::calculator::{DiagnosticRecord, reduce};
use crate::dictionary::Dictionary;
use crate::error::{FunctionObjectError, FunctionObjectResult};
use crate::function_object::FunctionObject;
use crate::output::{OutputFile, TimeSeriesWriter};
use crate::registry::ObjectRegistry;
use crate::sampler::FieldSampler;
use crate::zone_faces::{Sign, ZoneFaceIndexSet};

pub const TYPE_NAME: &str = "pipeCalc";

/// Settings read from a `pipeCalc` dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeCalcConfig {
    pub active: bool,
    pub velocity_field: String,
    pub face_zone: String,
    pub log: bool,
}

impl PipeCalcConfig {
    pub fn from_dict(dict: &Dictionary) -> FunctionObjectResult<Self> {
        Ok(Self {
            active: dict.lookup_or_default("active", true)?,
            velocity_field: dict.lookup_or_default("U", "U".to_string())?,
            face_zone: dict.lookup("faceZone")?,
            log: dict.lookup_or_default("log", true)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InactiveReason {
    /// `active: false` in the configuration.
    Disabled,
    /// The configured zone is not in the mesh's zone catalog.
    ZoneNotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Configured,
    Active,
    Inactive(InactiveReason),
}

/// Outage flags so each kind of degradation is logged once until it clears.
#[derive(Debug, Default)]
struct Outages {
    field_missing: bool,
    sampling: bool,
    persistence: bool,
    degenerate: bool,
}

impl Outages {
    /// Sampling and reduction failures share one flag.
    fn sampling_failed(&mut self, name: &str, e: &FunctionObjectError, message: &str) {
        if !self.sampling {
            warn!(name = %name, error = %e, "{message}");
            self.sampling = true;
        }
    }
}

/// Face-zone flow rate diagnostic.
#[derive(Debug)]
pub struct PipeCalc {
    name: String,
    config: PipeCalcConfig,
    state: LifecycleState,
    zone_faces: ZoneFaceIndexSet,
    sampler: FieldSampler,
    writer: TimeSeriesWriter,
    load_from_files: bool,
    outages: Outages,
    steps_executed: usize,
    last_record: Option<DiagnosticRecord>,
}

impl PipeCalc {
    /// Construct from a configuration dictionary and resolve the zone.
    ///
    /// Fails only on malformed configuration. An unknown zone leaves the
    /// object inactive.
    pub fn new(
        name: impl Into<String>,
        obr: ObjectRegistry<'_>,
        dict: &Dictionary,
        load_from_files: bool,
    ) -> FunctionObjectResult<Self> {
        let name = name.into();
        let config = PipeCalcConfig::from_dict(dict)?;
        let path = OutputFile::for_function_object(obr.case_dir(), &name, &obr.time().start_name());
        debug!(name = %name, path = %path.display(), load_from_files, "constructing pipeCalc");

        let mut pipe = Self {
            zone_faces: ZoneFaceIndexSet::new(config.face_zone.clone()),
            sampler: FieldSampler::new(config.velocity_field.clone()),
            writer: TimeSeriesWriter::new(path),
            name,
            config,
            state: LifecycleState::Configured,
            load_from_files,
            outages: Outages::default(),
            steps_executed: 0,
            last_record: None,
        };
        pipe.read(obr, dict)?;
        Ok(pipe)
    }

    pub fn config(&self) -> &PipeCalcConfig {
        &self.config
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == LifecycleState::Active
    }

    /// Last record appended (or computed, if the append failed).
    pub fn last_record(&self) -> Option<&DiagnosticRecord> {
        self.last_record.as_ref()
    }

    pub fn zone_faces(&self) -> &ZoneFaceIndexSet {
        &self.zone_faces
    }

    pub fn output_path(&self) -> &Path {
        self.writer.path()
    }

    pub fn rows_written(&self) -> usize {
        self.writer.rows_written()
    }

    pub fn steps_executed(&self) -> usize {
        self.steps_executed
    }

    pub fn loads_from_files(&self) -> bool {
        self.load_from_files
    }

    fn apply_config(&mut self, config: PipeCalcConfig) {
        if config.velocity_field != self.config.velocity_field {
            debug!(name = %self.name, field = %config.velocity_field, "velocity field changed");
            self.outages.field_missing = false;
        }
        self.sampler.set_field_name(&config.velocity_field);
        self.zone_faces.set_zone_name(&config.face_zone);
        self.config = config;
    }

    /// Sample, reduce and append one record for the current time.
    fn write_record(&mut self, obr: ObjectRegistry<'_>) {
        let mesh = obr.mesh();
        let faces = match self.zone_faces.resolve(mesh) {
            Ok(faces) => faces,
            Err(e) => {
                warn!(name = %self.name, error = %e, "deactivating");
                self.state = LifecycleState::Inactive(InactiveReason::ZoneNotFound);
                return;
            }
        };

        let velocities = match self.sampler.sample(obr.fields(), mesh, faces) {
            Ok(values) => {
                if self.outages.field_missing {
                    info!(name = %self.name, field = %self.config.velocity_field, "field available again");
                    self.outages.field_missing = false;
                }
                values
            }
            Err(e @ FunctionObjectError::FieldNotFound { .. }) => {
                if !self.outages.field_missing {
                    warn!(name = %self.name, error = %e, "skipping write");
                    self.outages.field_missing = true;
                }
                return;
            }
            Err(e) => {
                self.outages.sampling_failed(&self.name, &e, "sampling failed, skipping write");
                return;
            }
        };

        let area_vectors: Vec<Vector> = faces.iter().map(|f| mesh.face_area_vector(f.face)).collect();
        let signs: Vec<Sign> = faces.iter().map(|f| f.sign).collect();

        let record = match reduce(obr.time().time(), &area_vectors, &velocities, &signs) {
            Ok(record) => record,
            Err(e) => {
                let e = FunctionObjectError::from(e);
                self.outages.sampling_failed(&self.name, &e, "reduction failed, skipping write");
                return;
            }
        };
        if self.outages.sampling {
            info!(name = %self.name, "sampling recovered");
            self.outages.sampling = false;
        }

        if record.degenerate {
            if !self.outages.degenerate {
                let e = FunctionObjectError::DegenerateZone {
                    zone: self.config.face_zone.clone(),
                };
                warn!(name = %self.name, error = %e, "mean velocity reported as zero");
                self.outages.degenerate = true;
            }
        } else {
            self.outages.degenerate = false;
        }

        if self.config.log {
            info!(
                name = %self.name,
                time = record.time.value,
                flow_rate = record.flow_rate.value,
                mean_velocity = record.mean_velocity.value,
                total_area = record.total_area.value,
                "pipe flow"
            );
        }

        match self.writer.append_record(&record) {
            Ok(()) => self.outages.persistence = false,
            Err(e) => {
                if !self.outages.persistence {
                    warn!(name = %self.name, error = %e, "could not append record");
                    self.outages.persistence = true;
                }
            }
        }
        self.last_record = Some(record);
    }
}

impl FunctionObject for PipeCalc {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn read(&mut self, obr: ObjectRegistry<'_>, dict: &Dictionary) -> FunctionObjectResult<()> {
        let config = PipeCalcConfig::from_dict(dict)?;
        self.apply_config(config);

        if !self.config.active {
            debug!(name = %self.name, "disabled by configuration");
            self.state = LifecycleState::Inactive(InactiveReason::Disabled);
            return Ok(());
        }

        // The zone catalog may have changed since the last read.
        self.zone_faces.invalidate();
        self.state = match self.zone_faces.resolve(obr.mesh()) {
            Ok(faces) => {
                debug!(name = %self.name, zone = %self.config.face_zone, faces = faces.len(), "active");
                LifecycleState::Active
            }
            Err(e) => {
                warn!(name = %self.name, error = %e, "inactive until the configuration is re-read");
                LifecycleState::Inactive(InactiveReason::ZoneNotFound)
            }
        };
        Ok(())
    }

    fn execute(&mut self, obr: ObjectRegistry<'_>) {
        self.steps_executed += 1;
        trace!(name = %self.name, time = obr.time().value(), "execute");
    }

    fn time_set(&mut self, obr: ObjectRegistry<'_>) {
        trace!(name = %self.name, time = obr.time().value(), "time set");
    }

    fn write(&mut self, obr: ObjectRegistry<'_>) {
        match self.state {
            LifecycleState::Active => self.write_record(obr),
            state => trace!(name = %self.name, ?state, "not writing"),
        }
    }

    fn end(&mut self, _obr: ObjectRegistry<'_>) {
        if let Err(e) = self.writer.close() {
            warn!(name = %self.name, error = %e, "could not close output");
        }
        debug!(name = %self.name, rows = self.writer.rows_written(), "end");
    }

    fn update_mesh(&mut self, map: &MeshMap) {
        debug!(
            name = %self.name,
            old_faces = map.n_old_faces(),
            new_faces = map.n_new_faces(),
            "mesh topology changed"
        );
        self.zone_faces.invalidate();
    }

    fn move_points(&mut self, mesh: &dyn MeshAccess) {
        // Area vectors are read at write time; the face list stays valid.
        trace!(name = %self.name, points = mesh.n_points(), "points moved");
    }

    fn output_files(&self) -> Vec<PathBuf> {
        vec![self.writer.path().to_path_buf()]
    }
}
