//! Plain-text summary table

use std::collections::BTreeSet;
use std::fmt::Write;

use super::{ChartRenderer, ChartResult};
use crate::bench::Series;

/// Prints one row per batch size and one column per series
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    /// Format the table without printing it
    pub fn format_table(series: &[Series]) -> String {
        let sizes: BTreeSet<usize> = series
            .iter()
            .flat_map(|s| s.samples().iter().map(|sample| sample.batch_size))
            .collect();

        let mut out = String::new();
        let _ = write!(out, "{:>8}", "users");
        for s in series {
            let _ = write!(out, " | {:>22}", s.label());
        }
        out.push('\n');

        for size in sizes {
            let _ = write!(out, "{size:>8}");
            for s in series {
                match s.samples().iter().find(|sample| sample.batch_size == size) {
                    Some(sample) => {
                        let _ = write!(out, " | {:>18.3} sec", sample.elapsed_secs);
                    }
                    None => {
                        let _ = write!(out, " | {:>22}", "-");
                    }
                }
            }
            out.push('\n');
        }
        out
    }
}

impl ChartRenderer for TerminalRenderer {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn render(&self, series: &[Series]) -> ChartResult<()> {
        print!("{}", Self::format_table(series));
        Ok(())
    }
}
