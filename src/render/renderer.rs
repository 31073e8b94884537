use std::path::Path;

use crate::error::Result;
use crate::views::{HistogramView, ScatterView, TopNCountsView};

/// Draws a derived view into an image file at `path`, replacing any existing file.
pub trait ChartRenderer {
    fn histogram(&self, path: &Path, view: &HistogramView) -> Result<()>;
    fn top_counts(&self, path: &Path, view: &TopNCountsView) -> Result<()>;
    fn scatter(&self, path: &Path, view: &ScatterView) -> Result<()>;
}
