//! PNG rendering with plotters' bitmap backend.

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

use super::renderer::ChartRenderer;
use crate::error::{ReportError, Result};
use crate::views::{HistogramView, ScatterView, TopNCountsView};

/// 6.4 x 4.8 inches at 150 DPI.
pub const CANVAS_SIZE: (u32, u32) = (960, 720);

const FONT_FAMILY: &str = "sans-serif";
static FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);
const MEAN_LINE_COLOR: RGBColor = RGBColor(128, 128, 128);

/// Renders charts to PNG files using an embedded font, so output is the same
/// on every machine.
pub struct BitmapRenderer {
    size: (u32, u32),
}

impl BitmapRenderer {
    pub fn new() -> Result<Self> {
        plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES)
            .map_err(|_| ReportError::FontRegistration)?;
        Ok(Self { size: CANVAS_SIZE })
    }

    fn canvas<'a>(&self, path: &'a Path) -> DrawingArea<BitMapBackend<'a>, Shift> {
        BitMapBackend::new(path, self.size).into_drawing_area()
    }
}

/// Flushes a drawn chart to its backend and maps any failure onto `path`.
fn finish<DB: DrawingBackend>(
    path: &Path,
    root: &DrawingArea<DB, Shift>,
    drawn: DrawResult<(), DB>,
) -> Result<()> {
    drawn
        .and_then(|_| root.present())
        .map_err(|e| ReportError::render(path, e))?;
    debug!(path = %path.display(), "Chart written");
    Ok(())
}

impl ChartRenderer for BitmapRenderer {
    fn histogram(&self, path: &Path, view: &HistogramView) -> Result<()> {
        let root = self.canvas(path);
        finish(path, &root, draw_histogram(&root, view))
    }

    fn top_counts(&self, path: &Path, view: &TopNCountsView) -> Result<()> {
        let root = self.canvas(path);
        finish(path, &root, draw_top_counts(&root, view))
    }

    fn scatter(&self, path: &Path, view: &ScatterView) -> Result<()> {
        let root = self.canvas(path);
        finish(path, &root, draw_scatter(&root, view))
    }
}

pub fn draw_histogram<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    view: &HistogramView,
) -> DrawResult<(), DB> {
    root.fill(&WHITE)?;

    let (lo, hi) = view.range();
    let y_max = view.max_count().max(1) as f64 * 1.05;

    let mut chart = ChartBuilder::on(root)
        .caption("Distribution of Average Movie Ratings", (FONT_FAMILY, 24))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(lo..hi, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Average rating")
        .y_desc("Number of movies")
        .axis_desc_style((FONT_FAMILY, 18))
        .label_style((FONT_FAMILY, 14))
        .draw()?;

    chart.draw_series(
        view.bars()
            .map(|(l, u, c)| Rectangle::new([(l, 0.0), (u, c as f64)], BAR_COLOR.filled())),
    )?;
    // black bar outlines
    chart.draw_series(
        view.bars()
            .map(|(l, u, c)| Rectangle::new([(l, 0.0), (u, c as f64)], BLACK.stroke_width(1))),
    )?;

    Ok(())
}

/// Horizontal bars, highest count on top.
pub fn draw_top_counts<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    view: &TopNCountsView,
) -> DrawResult<(), DB> {
    root.fill(&WHITE)?;

    let slots = view.len().max(1) as i32;
    let x_max = view.max_count().max(1) as f64 * 1.05;

    // rank 0 sits in the top slot
    let slot_of = |rank: usize| slots - 1 - rank as i32;
    let label_of = |v: &SegmentValue<i32>| match v {
        SegmentValue::CenterOf(slot) if (0..slots).contains(slot) => view
            .bars
            .get((slots - 1 - slot) as usize)
            .map(|b| b.movie_id.to_string())
            .unwrap_or_default(),
        _ => String::new(),
    };

    let mut chart = ChartBuilder::on(root)
        .caption("Top-20 Movies by Rating Count", (FONT_FAMILY, 24))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(80)
        .build_cartesian_2d(0f64..x_max, (0..slots - 1).into_segmented())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .y_labels(slots as usize)
        .y_label_formatter(&label_of)
        .x_desc("Number of ratings")
        .y_desc("Movie ID")
        .axis_desc_style((FONT_FAMILY, 18))
        .label_style((FONT_FAMILY, 14))
        .draw()?;

    chart.draw_series(view.bars.iter().enumerate().map(|(rank, bar)| {
        let slot = slot_of(rank);
        let upper = if slot + 1 < slots {
            SegmentValue::Exact(slot + 1)
        } else {
            SegmentValue::Last
        };
        let mut rect = Rectangle::new(
            [(0.0, SegmentValue::Exact(slot)), (bar.cnt as f64, upper)],
            BAR_COLOR.filled(),
        );
        rect.set_margin(3, 3, 0, 0);
        rect
    }))?;

    Ok(())
}

/// Count on a log axis against average rating, with a dashed line at the mean.
pub fn draw_scatter<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    view: &ScatterView,
) -> DrawResult<(), DB> {
    root.fill(&WHITE)?;

    let (x_lo, x_hi) = view.x_range();
    let (y_lo, y_hi) = view.y_range();

    let mut chart = ChartBuilder::on(root)
        .caption("Average Rating vs #Ratings (log-scale)", (FONT_FAMILY, 24))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d((x_lo..x_hi).log_scale(), y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Number of ratings (log10)")
        .y_desc("Average rating")
        .axis_desc_style((FONT_FAMILY, 18))
        .label_style((FONT_FAMILY, 14))
        .draw()?;

    chart.draw_series(
        view.points
            .iter()
            .map(|&(cnt, avg)| Circle::new((cnt as f64, avg), 2, BAR_COLOR.mix(0.4).filled())),
    )?;

    if let Some(mean) = view.mean_avg {
        chart.draw_series(DashedLineSeries::new(
            vec![(x_lo, mean), (x_hi, mean)],
            6,
            4,
            MEAN_LINE_COLOR.stroke_width(1),
        ))?;
    }

    Ok(())
}
