//! Plotly figure output
//!
//! Writes the series as a plotly figure document: one `scatter` trace per
//! series plus a layout with axis titles. Any plotly front-end (plotly.js,
//! `plotly.io.read_json`, the VS Code viewer) can display the file.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use super::{ensure_parent_dir, ChartError, ChartRenderer, ChartResult};
use crate::bench::Series;

/// Default file name inside the output directory
pub const DEFAULT_FILE_NAME: &str = "bench_chart.json";

#[derive(Debug, Serialize)]
struct Trace<'a> {
    x: Vec<usize>,
    y: Vec<f64>,
    #[serde(rename = "type")]
    kind: &'static str,
    mode: &'static str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct Axis {
    title: &'static str,
}

#[derive(Debug, Serialize)]
struct Layout {
    title: &'static str,
    xaxis: Axis,
    yaxis: Axis,
}

#[derive(Debug, Serialize)]
struct Figure<'a> {
    data: Vec<Trace<'a>>,
    layout: Layout,
}

fn figure(series: &[Series]) -> Figure<'_> {
    Figure {
        data: series
            .iter()
            .map(|s| Trace {
                x: s.batch_sizes(),
                y: s.elapsed_secs(),
                kind: "scatter",
                mode: "markers",
                name: s.label(),
            })
            .collect(),
        layout: Layout {
            title: "User load time by batch size",
            xaxis: Axis {
                title: "Users loaded",
            },
            yaxis: Axis {
                title: "Elapsed (sec)",
            },
        },
    }
}

/// Writes a plotly figure JSON file
#[derive(Debug, Clone)]
pub struct PlotlyJsonRenderer {
    path: PathBuf,
}

impl PlotlyJsonRenderer {
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

impl ChartRenderer for PlotlyJsonRenderer {
    fn name(&self) -> &'static str {
        "plotly"
    }

    fn render(&self, series: &[Series]) -> ChartResult<()> {
        ensure_parent_dir(&self.path)?;
        let file = File::create(&self.path)
            .map_err(|e| ChartError::IoError(format!("Failed to create file: {e}")))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, &figure(series))
            .map_err(|e| ChartError::SerializationError(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| ChartError::IoError(format!("Failed to flush: {e}")))?;

        info!("Chart written to {}", self.path.display());
        Ok(())
    }
}
