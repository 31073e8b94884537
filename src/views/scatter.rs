use serde::Serialize;

use crate::records::JoinedRow;
use crate::views::utility::{mean, min_max, padded};

/// Average rating against rating count, for a log-scaled count axis.
///
/// Rows with a zero count cannot be placed on a log axis and are left out of
/// `points`; `excluded_zero_counts` says how many. They still count toward
/// `mean_avg`, which covers every joined row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterView {
    pub points: Vec<(u64, f64)>,
    pub excluded_zero_counts: usize,
    pub mean_avg: Option<f64>,
}

impl ScatterView {
    pub fn from_joined(rows: &[JoinedRow]) -> Self {
        let avgs: Vec<f64> = rows.iter().map(|r| r.avg).collect();
        let mean_avg = (!avgs.is_empty()).then(|| mean(&avgs));

        let points: Vec<(u64, f64)> = rows
            .iter()
            .filter(|r| r.cnt > 0)
            .map(|r| (r.cnt, r.avg))
            .collect();

        ScatterView {
            excluded_zero_counts: rows.len() - points.len(),
            points,
            mean_avg,
        }
    }

    /// Count axis range, strictly positive, with some room around the data.
    pub fn x_range(&self) -> (f64, f64) {
        match min_max(self.points.iter().map(|&(c, _)| c as f64)) {
            None => (1.0, 10.0),
            Some((lo, hi)) => ((lo / 1.5).max(f64::MIN_POSITIVE), hi * 1.5),
        }
    }

    /// Rating axis range covering the plotted points and the mean line.
    pub fn y_range(&self) -> (f64, f64) {
        let values = self.points.iter().map(|&(_, a)| a).chain(self.mean_avg);
        match min_max(values) {
            None => (0.0, 5.0),
            Some((lo, hi)) => padded(lo, hi, 0.05, 0.5),
        }
    }
}
