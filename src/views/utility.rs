/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Returns `(min, max)` of the values, or `None` for empty input.
pub fn min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Widens `[lo, hi]` by `fraction` of its span on each side, or by `fallback`
/// when the span is zero.
pub fn padded(lo: f64, hi: f64, fraction: f64, fallback: f64) -> (f64, f64) {
    let span = hi - lo;
    let pad = if span > 0.0 { span * fraction } else { fallback };
    (lo - pad, hi + pad)
}
