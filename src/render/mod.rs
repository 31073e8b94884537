//! Chart rendering.
//!
//! [`ChartRenderer`] is the seam between derived views and the drawing
//! backend. [`BitmapRenderer`] implements it with plotters, writing PNGs.

mod bitmap;
mod renderer;

pub use bitmap::{BitmapRenderer, CANVAS_SIZE, draw_histogram, draw_scatter, draw_top_counts};
pub use renderer::ChartRenderer;
