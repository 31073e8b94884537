//! Output sink: the chart directory, fixed chart file names, and run summary logging.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::report::RunSummary;

pub const HIST_FILE: &str = "hist_avg.png";
pub const TOP_COUNTS_FILE: &str = "top20_counts.png";
pub const SCATTER_FILE: &str = "scatter_avg_vs_cnt.png";

/// Creates `dir` and any missing parents. An existing directory is not an error.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    let existed = dir.is_dir();
    fs::create_dir_all(dir).map_err(|e| ReportError::render(dir, e))?;
    debug!(dir = %dir.display(), existed, "Output directory ready");
    Ok(())
}

/// Path of a chart file inside the output directory.
pub fn chart_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(file_name)
}

/// Logs a [`RunSummary`] as pretty-printed JSON at debug level.
pub fn print_json(summary: &RunSummary) -> serde_json::Result<()> {
    debug!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}
