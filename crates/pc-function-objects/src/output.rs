//! Time-series output files.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::calculator::DiagnosticRecord;
use crate::error::{FunctionObjectError, FunctionObjectResult};
use crate::registry::time_name;

/// Column header written at the top of every new time-series file.
pub const HEADER: &str = "# Time\tflowRate [m3/s]\tmeanVelocity [m/s]\ttotalArea [m2]";

/// Output location convention for function objects.
pub struct OutputFile;

impl OutputFile {
    /// `<case>/postProcessing/<name>/<start time>/<name>.dat`
    pub fn for_function_object(case_dir: &Path, name: &str, start_name: &str) -> PathBuf {
        case_dir
            .join("postProcessing")
            .join(name)
            .join(start_name)
            .join(format!("{name}.dat"))
    }
}

/// Append-only writer for `DiagnosticRecord` rows.
///
/// The file is opened lazily in append mode. A header is written only when the
/// file is empty, so reopening a file left by an earlier run continues it.
#[derive(Debug)]
pub struct TimeSeriesWriter {
    path: PathBuf,
    file: Option<BufWriter<File>>,
    rows: usize,
}

impl TimeSeriesWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
            rows: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Rows appended by this writer.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Append one row and flush it.
    ///
    /// On failure the handle and any unflushed bytes are dropped, so a failed
    /// row never reaches the file and the next call reopens it.
    pub fn append_record(&mut self, record: &DiagnosticRecord) -> FunctionObjectResult<()> {
        let line = format_row(record);
        let result = self.open().and_then(|file| {
            writeln!(file, "{line}")?;
            file.flush()
        });
        match result {
            Ok(()) => {
                self.rows += 1;
                Ok(())
            }
            Err(source) => {
                if let Some(file) = self.file.take() {
                    // Discard the buffer; dropping a BufWriter would retry the flush.
                    let _ = file.into_parts();
                }
                Err(FunctionObjectError::Persistence {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    /// Flush and release the file handle.
    pub fn close(&mut self) -> FunctionObjectResult<()> {
        if let Some(mut file) = self.file.take() {
            file.flush().map_err(|source| FunctionObjectError::Persistence {
                path: self.path.clone(),
                source,
            })?;
            debug!(path = %self.path.display(), rows = self.rows, "closed time series");
        }
        Ok(())
    }

    fn open(&mut self) -> std::io::Result<&mut BufWriter<File>> {
        let file = match self.file.take() {
            Some(file) => file,
            None => {
                if let Some(dir) = self.path.parent() {
                    fs::create_dir_all(dir)?;
                }
                let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
                let mut file = BufWriter::new(file);
                if file.get_ref().metadata()?.len() == 0 {
                    writeln!(file, "{HEADER}")?;
                    debug!(path = %self.path.display(), "started time series");
                } else {
                    debug!(path = %self.path.display(), "continuing time series");
                }
                file
            }
        };
        Ok(self.file.insert(file))
    }
}

/// `time \t flowRate \t meanVelocity \t totalArea`
pub fn format_row(record: &DiagnosticRecord) -> String {
    format!(
        "{}\t{:.10e}\t{:.10e}\t{:.10e}",
        time_name(record.time.value),
        record.flow_rate.value,
        record.mean_velocity.value,
        record.total_area.value
    )
}
