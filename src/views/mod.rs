//! Chart series derived from the loaded tables.
//!
//! Each view is a plain value computed once from the read-only tables and
//! handed to a [`ChartRenderer`](crate::render::ChartRenderer). Nothing here
//! touches the filesystem.

pub mod histogram;
pub mod scatter;
pub mod top_counts;
pub mod utility;

pub use histogram::{HIST_BINS, HistogramView};
pub use scatter::ScatterView;
pub use top_counts::{TOP_N, TopNCountsView};
