//! Percentage helpers for the per-type breakdown.

/// Share of `count` in `total` as a percentage rounded to two decimals.
///
/// Returns `None` when `total` is zero: an empty report has no breakdown,
/// and callers render nothing rather than a NaN.
pub fn percentage(count: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let raw = count as f64 / total as f64 * 100.0;
    Some((raw * 100.0).round() / 100.0)
}

/// [`percentage`] fixed to two decimal places, e.g. `"66.67"`.
pub fn format_percentage(count: u64, total: u64) -> Option<String> {
    percentage(count, total).map(|p| format!("{p:.2}"))
}
