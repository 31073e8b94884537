use serde::Serialize;

use crate::records::RatingCount;

/// How many movies the ranked bar chart shows.
pub const TOP_N: usize = 20;

/// The most-rated movies, highest count first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopNCountsView {
    pub bars: Vec<RatingCount>,
}

impl TopNCountsView {
    /// Takes the `n` highest counts. Ties keep their input order.
    pub fn from_counts(counts: &[RatingCount], n: usize) -> Self {
        let mut ranked = counts.to_vec();
        // sort_by is stable
        ranked.sort_by(|a, b| b.cnt.cmp(&a.cnt));
        ranked.truncate(n);
        TopNCountsView { bars: ranked }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn max_count(&self) -> u64 {
        self.bars.first().map(|b| b.cnt).unwrap_or(0)
    }
}
