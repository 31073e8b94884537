pub mod error;
pub mod loader;
pub mod output;
pub mod records;
pub mod render;
pub mod report;
pub mod views;

pub use error::ReportError;
pub use report::{ReportConfig, ReportGenerator, RunSummary};
