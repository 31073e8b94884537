//! Error taxonomy for loading aggregate files and rendering charts.

use std::path::PathBuf;

/// Errors that abort a report run. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("input file not found: {}", path.display())]
    InputMissing { path: PathBuf },

    #[error("failed to read input {}: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input {} at line {line}: {reason}", path.display())]
    InputMalformed {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("failed to render {}: {reason}", path.display())]
    Render { path: PathBuf, reason: String },

    #[error("embedded chart font could not be registered")]
    FontRegistration,
}

impl ReportError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, line: u64, reason: impl Into<String>) -> Self {
        ReportError::InputMalformed {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn render(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ReportError::Render {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
