//! CSV sample table

use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{ensure_parent_dir, ChartError, ChartRenderer, ChartResult};
use crate::bench::Series;

/// Default file name inside the output directory
pub const DEFAULT_FILE_NAME: &str = "bench_samples.csv";

/// CSV record for one timing sample
#[derive(Debug, Serialize)]
struct SampleRecord<'a> {
    series: &'a str,
    batch_size: usize,
    elapsed_secs: f64,
}

/// Writes every sample as `series,batch_size,elapsed_secs`
#[derive(Debug, Clone)]
pub struct CsvRenderer {
    path: PathBuf,
}

impl CsvRenderer {
    /// Renderer writing to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Renderer writing [`DEFAULT_FILE_NAME`] inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    /// Output path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartRenderer for CsvRenderer {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn render(&self, series: &[Series]) -> ChartResult<()> {
        ensure_parent_dir(&self.path)?;
        let file = File::create(&self.path)
            .map_err(|e| ChartError::IoError(format!("Failed to create file: {e}")))?;
        let mut writer = Writer::from_writer(BufWriter::new(file));

        let mut rows = 0usize;
        for s in series {
            for sample in s.samples() {
                writer
                    .serialize(SampleRecord {
                        series: s.label(),
                        batch_size: sample.batch_size,
                        elapsed_secs: sample.elapsed_secs,
                    })
                    .map_err(|e| ChartError::CsvError(format!("Failed to write sample: {e}")))?;
                rows += 1;
            }
        }

        writer
            .flush()
            .map_err(|e| ChartError::IoError(format!("Failed to flush: {e}")))?;

        info!("{} samples written to {}", rows, self.path.display());
        Ok(())
    }
}
