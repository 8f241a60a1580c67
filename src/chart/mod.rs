//! Chart renderers
//!
//! A renderer receives the recorded series and turns them into something a
//! person can look at. Each series becomes one scatter trace (x = batch size,
//! y = elapsed seconds) with its label as the legend entry.

use crate::bench::Series;

pub mod csv;
pub mod plotly;
pub mod terminal;

pub use self::csv::CsvRenderer;
pub use self::plotly::PlotlyJsonRenderer;
pub use self::terminal::TerminalRenderer;

/// Chart rendering errors
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// CSV write error
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Result type for chart operations
pub type ChartResult<T> = Result<T, ChartError>;

/// Renders labeled scatter series
pub trait ChartRenderer {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Render every series onto one chart
    fn render(&self, series: &[Series]) -> ChartResult<()>;
}

/// Render with every renderer in turn, stopping at the first failure
pub fn render_all(renderers: &[Box<dyn ChartRenderer>], series: &[Series]) -> ChartResult<()> {
    for renderer in renderers {
        tracing::debug!(renderer = renderer.name(), "Rendering chart");
        renderer.render(series)?;
    }
    Ok(())
}

/// Create the parent directory of `path` if needed
fn ensure_parent_dir(path: &std::path::Path) -> ChartResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ChartError::IoError(format!("Failed to create directory: {e}")))?;
        }
    }
    Ok(())
}
