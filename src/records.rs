//! Typed rows of the two aggregate tables and their join.

use serde::Serialize;
use std::collections::HashMap;

/// Movie identifier as written by the aggregation job.
pub type MovieId = u32;

/// One row of `avg_ratings.tsv`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingAverage {
    pub movie_id: MovieId,
    pub avg: f64,
}

/// One row of `rating_counts.tsv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingCount {
    pub movie_id: MovieId,
    pub cnt: u64,
}

/// A movie present in both tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JoinedRow {
    pub movie_id: MovieId,
    pub avg: f64,
    pub cnt: u64,
}

impl From<(MovieId, f64)> for RatingAverage {
    fn from((movie_id, avg): (MovieId, f64)) -> Self {
        RatingAverage { movie_id, avg }
    }
}

impl From<(MovieId, u64)> for RatingCount {
    fn from((movie_id, cnt): (MovieId, u64)) -> Self {
        RatingCount { movie_id, cnt }
    }
}

/// Inner-joins averages and counts on `movie_id`.
///
/// Output follows the order of `averages`. A key repeated in either table
/// yields every pairing for that key, with the count-side pairs in count
/// table order.
pub fn inner_join(averages: &[RatingAverage], counts: &[RatingCount]) -> Vec<JoinedRow> {
    let mut by_id: HashMap<MovieId, Vec<u64>> = HashMap::new();
    for c in counts {
        by_id.entry(c.movie_id).or_default().push(c.cnt);
    }

    let mut joined = Vec::with_capacity(averages.len().min(counts.len()));
    for a in averages {
        if let Some(cnts) = by_id.get(&a.movie_id) {
            joined.extend(cnts.iter().map(|&cnt| JoinedRow {
                movie_id: a.movie_id,
                avg: a.avg,
                cnt,
            }));
        }
    }

    joined
}
