//! Loader for the headerless two-column TSV files written by the aggregation job.
//!
//! Each line is `movieId<TAB>value`. Any line that does not parse aborts the
//! whole load: there is no meaningful chart from half a table.

use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::records::{MovieId, RatingAverage, RatingCount};

/// A value column type the loader knows how to parse.
pub trait TableValue: Sized {
    /// Parses a single trimmed field, returning a human-readable reason on failure.
    fn parse_field(field: &str) -> std::result::Result<Self, String>;
}

impl TableValue for f64 {
    fn parse_field(field: &str) -> std::result::Result<Self, String> {
        let value: f64 = field
            .parse()
            .map_err(|_| format!("value `{field}` is not a number"))?;
        if !value.is_finite() {
            return Err(format!("value `{field}` is not a finite number"));
        }
        Ok(value)
    }
}

impl TableValue for u64 {
    fn parse_field(field: &str) -> std::result::Result<Self, String> {
        field
            .parse()
            .map_err(|_| format!("value `{field}` is not a non-negative integer"))
    }
}

/// Reads `path` into an ordered list of `(movie_id, value)` rows.
///
/// # Errors
///
/// - [`ReportError::InputMissing`] if the file does not exist.
/// - [`ReportError::InputUnreadable`] if it cannot be opened or read.
/// - [`ReportError::InputMalformed`] if a row is not exactly two fields, or a
///   field does not parse.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_table<V: TableValue>(path: &Path) -> Result<Vec<(MovieId, V)>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ReportError::InputMissing {
            path: path.to_path_buf(),
        },
        _ => ReportError::InputUnreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != 2 {
            return Err(ReportError::malformed(
                path,
                line,
                format!("expected 2 tab-separated fields, found {}", record.len()),
            ));
        }

        let movie_id: MovieId = record[0]
            .parse()
            .map_err(|_| ReportError::malformed(path, line, format!("movie id `{}` is not a valid identifier", &record[0])))?;
        let value = V::parse_field(&record[1]).map_err(|reason| ReportError::malformed(path, line, reason))?;

        rows.push((movie_id, value));
    }

    debug!(rows = rows.len(), "Table loaded");
    Ok(rows)
}

/// Loads `avg_ratings.tsv`-shaped data.
pub fn load_averages(path: &Path) -> Result<Vec<RatingAverage>> {
    Ok(load_table::<f64>(path)?
        .into_iter()
        .map(RatingAverage::from)
        .collect())
}

/// Loads `rating_counts.tsv`-shaped data.
pub fn load_counts(path: &Path) -> Result<Vec<RatingCount>> {
    Ok(load_table::<u64>(path)?
        .into_iter()
        .map(RatingCount::from)
        .collect())
}

fn csv_error(path: &Path, err: csv::Error) -> ReportError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    match err.into_kind() {
        csv::ErrorKind::Io(source) => ReportError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        },
        csv::ErrorKind::Utf8 { err, .. } => ReportError::malformed(path, line, err.to_string()),
        other => ReportError::malformed(path, line, format!("{other:?}")),
    }
}
