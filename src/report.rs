//! The report pipeline: load both tables, derive the chart views, render them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::error::Result;
use crate::loader::{load_averages, load_counts};
use crate::output::{HIST_FILE, SCATTER_FILE, TOP_COUNTS_FILE, chart_path, ensure_output_dir};
use crate::records::inner_join;
use crate::render::ChartRenderer;
use crate::views::{HIST_BINS, HistogramView, ScatterView, TOP_N, TopNCountsView};

/// Where to read the aggregate files, where to write charts, and which charts to draw.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub avg_path: PathBuf,
    pub counts_path: PathBuf,
    pub output_dir: PathBuf,
    pub include_scatter: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            avg_path: PathBuf::from("avg_ratings.tsv"),
            counts_path: PathBuf::from("rating_counts.tsv"),
            output_dir: PathBuf::from("output"),
            include_scatter: true,
        }
    }
}

/// What a run read and wrote.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub output_dir: PathBuf,
    pub averages: usize,
    pub counts: usize,
    pub joined: usize,
    pub excluded_zero_counts: usize,
    pub mean_avg: Option<f64>,
    pub files: Vec<PathBuf>,
}

pub struct ReportGenerator<R: ChartRenderer> {
    config: ReportConfig,
    renderer: R,
}

impl<R: ChartRenderer> ReportGenerator<R> {
    pub fn new(config: ReportConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Runs the whole pipeline once.
    ///
    /// Both tables are loaded before the output directory is touched, so a
    /// missing or malformed input leaves no trace on disk.
    #[tracing::instrument(skip_all, fields(output_dir = %self.config.output_dir.display()))]
    pub fn run(&self) -> Result<RunSummary> {
        let averages = load_averages(&self.config.avg_path)?;
        let counts = load_counts(&self.config.counts_path)?;
        info!(averages = averages.len(), counts = counts.len(), "Tables loaded");

        let avg_values: Vec<f64> = averages.iter().map(|a| a.avg).collect();
        let histogram = HistogramView::from_values(&avg_values, HIST_BINS);
        let top = TopNCountsView::from_counts(&counts, TOP_N);
        let joined = inner_join(&averages, &counts);
        let scatter = ScatterView::from_joined(&joined);

        let dir = &self.config.output_dir;
        ensure_output_dir(dir)?;

        let mut files = Vec::new();

        let path = chart_path(dir, HIST_FILE);
        self.renderer.histogram(&path, &histogram)?;
        files.push(path);

        let path = chart_path(dir, TOP_COUNTS_FILE);
        self.renderer.top_counts(&path, &top)?;
        files.push(path);

        if self.config.include_scatter {
            if scatter.excluded_zero_counts > 0 {
                warn!(
                    excluded = scatter.excluded_zero_counts,
                    "Zero-count rows left off the log-scale scatter"
                );
            }
            let path = chart_path(dir, SCATTER_FILE);
            self.renderer.scatter(&path, &scatter)?;
            files.push(path);
        }

        info!(charts = files.len(), "Charts rendered");

        Ok(RunSummary {
            generated_at: Utc::now(),
            output_dir: dir.clone(),
            averages: averages.len(),
            counts: counts.len(),
            joined: joined.len(),
            excluded_zero_counts: scatter.excluded_zero_counts,
            mean_avg: scatter.mean_avg,
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use std::cell::RefCell;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Records every render call instead of drawing.
    #[derive(Default)]
    struct RecordingRenderer {
        calls: RefCell<Vec<(String, PathBuf)>>,
        top: RefCell<Option<TopNCountsView>>,
        scatter: RefCell<Option<ScatterView>>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn histogram(&self, path: &Path, _view: &HistogramView) -> Result<()> {
            self.calls.borrow_mut().push(("histogram".into(), path.to_path_buf()));
            Ok(())
        }

        fn top_counts(&self, path: &Path, view: &TopNCountsView) -> Result<()> {
            self.calls.borrow_mut().push(("top_counts".into(), path.to_path_buf()));
            *self.top.borrow_mut() = Some(view.clone());
            Ok(())
        }

        fn scatter(&self, path: &Path, view: &ScatterView) -> Result<()> {
            self.calls.borrow_mut().push(("scatter".into(), path.to_path_buf()));
            *self.scatter.borrow_mut() = Some(view.clone());
            Ok(())
        }
    }

    fn config_in(dir: &TempDir) -> ReportConfig {
        ReportConfig {
            avg_path: dir.path().join("avg_ratings.tsv"),
            counts_path: dir.path().join("rating_counts.tsv"),
            output_dir: dir.path().join("output"),
            include_scatter: true,
        }
    }

    fn write_inputs(dir: &TempDir, avg: &str, counts: &str) {
        fs::write(dir.path().join("avg_ratings.tsv"), avg).unwrap();
        fs::write(dir.path().join("rating_counts.tsv"), counts).unwrap();
    }

    #[test]
    fn test_default_config_uses_fixed_names() {
        let config = ReportConfig::default();
        assert_eq!(config.avg_path, PathBuf::from("avg_ratings.tsv"));
        assert_eq!(config.counts_path, PathBuf::from("rating_counts.tsv"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert!(config.include_scatter);
    }

    #[test]
    fn test_run_renders_three_charts_in_order() {
        let tmp = TempDir::new().unwrap();
        write_inputs(&tmp, "1\t3.5\n2\t4.0\n3\t2.0\n", "1\t10\n2\t5\n3\t0\n");
        let generator = ReportGenerator::new(config_in(&tmp), RecordingRenderer::default());

        let summary = generator.run().unwrap();

        let out = tmp.path().join("output");
        let calls = generator.renderer().calls.borrow();
        assert_eq!(
            *calls,
            vec![
                ("histogram".to_string(), out.join("hist_avg.png")),
                ("top_counts".to_string(), out.join("top20_counts.png")),
                ("scatter".to_string(), out.join("scatter_avg_vs_cnt.png")),
            ]
        );
        assert_eq!(summary.files.len(), 3);
        assert_eq!(summary.joined, 3);
        assert_eq!(summary.excluded_zero_counts, 1);
        assert!((summary.mean_avg.unwrap() - 3.1667).abs() < 1e-4);
        assert!(out.is_dir());
    }

    #[test]
    fn test_run_top_counts_scenario() {
        let tmp = TempDir::new().unwrap();
        write_inputs(&tmp, "1\t3.5\n2\t4.0\n3\t2.0\n", "1\t10\n2\t5\n3\t0\n");
        let generator = ReportGenerator::new(config_in(&tmp), RecordingRenderer::default());

        generator.run().unwrap();

        let top = generator.renderer().top.borrow().clone().unwrap();
        let ranked: Vec<(u32, u64)> = top.bars.iter().map(|b| (b.movie_id, b.cnt)).collect();
        assert_eq!(ranked, vec![(1, 10), (2, 5), (3, 0)]);

        let scatter = generator.renderer().scatter.borrow().clone().unwrap();
        assert_eq!(scatter.points, vec![(10, 3.5), (5, 4.0)]);
    }

    #[test]
    fn test_run_without_scatter() {
        let tmp = TempDir::new().unwrap();
        write_inputs(&tmp, "1\t3.5\n", "1\t10\n");
        let config = ReportConfig {
            include_scatter: false,
            ..config_in(&tmp)
        };
        let generator = ReportGenerator::new(config, RecordingRenderer::default());

        let summary = generator.run().unwrap();

        assert_eq!(summary.files.len(), 2);
        assert!(generator.renderer().scatter.borrow().is_none());
    }

    #[test]
    fn test_missing_counts_leaves_output_untouched() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("avg_ratings.tsv"), "1\t3.5\n").unwrap();
        let generator = ReportGenerator::new(config_in(&tmp), RecordingRenderer::default());

        let err = generator.run().unwrap_err();

        assert!(matches!(err, ReportError::InputMissing { .. }));
        assert!(generator.renderer().calls.borrow().is_empty());
        assert!(!tmp.path().join("output").exists());
    }

    #[test]
    fn test_malformed_average_aborts_before_render() {
        let tmp = TempDir::new().unwrap();
        write_inputs(&tmp, "1\t3.5\n7\tNaN\n", "1\t10\n7\t2\n");
        let generator = ReportGenerator::new(config_in(&tmp), RecordingRenderer::default());

        let err = generator.run().unwrap_err();

        assert!(matches!(err, ReportError::InputMalformed { line: 2, .. }));
        assert!(generator.renderer().calls.borrow().is_empty());
        assert!(!tmp.path().join("output").exists());
    }

    #[test]
    fn test_render_failure_stops_run() {
        struct FailingRenderer;

        impl ChartRenderer for FailingRenderer {
            fn histogram(&self, path: &Path, _view: &HistogramView) -> Result<()> {
                Err(ReportError::render(path, "permission denied"))
            }
            fn top_counts(&self, _path: &Path, _view: &TopNCountsView) -> Result<()> {
                panic!("top_counts must not run after a failed histogram");
            }
            fn scatter(&self, _path: &Path, _view: &ScatterView) -> Result<()> {
                panic!("scatter must not run after a failed histogram");
            }
        }

        let tmp = TempDir::new().unwrap();
        write_inputs(&tmp, "1\t3.5\n", "1\t10\n");
        let generator = ReportGenerator::new(config_in(&tmp), FailingRenderer);

        match generator.run().unwrap_err() {
            ReportError::Render { path, .. } => assert!(path.ends_with("hist_avg.png")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
