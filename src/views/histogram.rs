use serde::Serialize;

use crate::views::utility::min_max;

/// Number of equal-width bins in the average-rating histogram.
pub const HIST_BINS: usize = 20;

/// Equal-width frequency histogram of average ratings.
///
/// `edges` has `counts.len() + 1` entries. Every bin includes its lower edge;
/// the last bin also includes the upper edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramView {
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl HistogramView {
    /// Bins `values` into `bins` intervals spanning `[min, max]`.
    ///
    /// A zero-width range is widened to `[v - 0.5, v + 0.5]`; empty input
    /// bins over `[0, 1]`.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let (lo, hi) = match min_max(values.iter().copied()) {
            None => (0.0, 1.0),
            Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
            Some(range) => range,
        };

        let width = (hi - lo) / bins as f64;
        let mut edges: Vec<f64> = (0..bins).map(|i| lo + i as f64 * width).collect();
        edges.push(hi);

        let mut counts = vec![0u64; bins];
        for &v in values {
            let mut idx = (((v - lo) / width) as usize).min(bins - 1);
            // float division can land one bin off near an edge
            if idx > 0 && v < edges[idx] {
                idx -= 1;
            } else if idx < bins - 1 && v >= edges[idx + 1] {
                idx += 1;
            }
            counts[idx] += 1;
        }

        HistogramView { edges, counts }
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn range(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(lower, upper, count)` for each bin, lowest first.
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64, u64)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| (w[0], w[1], c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_edges_evenly_partition_range() {
        let values = [0.5, 1.0, 2.75, 3.3, 5.0];
        let hist = HistogramView::from_values(&values, HIST_BINS);

        assert_eq!(hist.bins(), 20);
        assert_eq!(hist.edges.len(), 21);
        assert_eq!(hist.range(), (0.5, 5.0));

        let expected = (5.0 - 0.5) / 20.0;
        for w in hist.edges.windows(2) {
            assert!((w[1] - w[0] - expected).abs() < EPS);
        }
    }

    #[test]
    fn test_every_value_counted_once() {
        let values: Vec<f64> = (0..=100).map(|i| i as f64 * 0.05).collect();
        let hist = HistogramView::from_values(&values, HIST_BINS);

        assert_eq!(hist.total(), values.len() as u64);
    }

    #[test]
    fn test_max_value_lands_in_last_bin() {
        let hist = HistogramView::from_values(&[1.0, 2.0, 3.0], 4);

        assert_eq!(hist.counts, vec![1, 0, 1, 1]);
    }

    #[test]
    fn test_value_on_inner_edge_goes_to_upper_bin() {
        // edges: 0, 1, 2, 3, 4
        let hist = HistogramView::from_values(&[0.0, 1.0, 2.0, 4.0], 4);

        assert_eq!(hist.counts, vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_identical_values_widen_range() {
        let hist = HistogramView::from_values(&[3.0, 3.0, 3.0], HIST_BINS);

        assert_eq!(hist.range(), (2.5, 3.5));
        assert_eq!(hist.total(), 3);
        assert_eq!(hist.max_count(), 3);
    }

    #[test]
    fn test_empty_values() {
        let hist = HistogramView::from_values(&[], HIST_BINS);

        assert_eq!(hist.range(), (0.0, 1.0));
        assert_eq!(hist.bins(), 20);
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.max_count(), 0);
    }

    #[test]
    fn test_bars_pair_edges_with_counts() {
        let hist = HistogramView::from_values(&[0.0, 2.0], 2);
        let bars: Vec<_> = hist.bars().collect();

        assert_eq!(bars, vec![(0.0, 1.0, 1), (1.0, 2.0, 1)]);
    }
}
