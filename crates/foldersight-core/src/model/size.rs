/// Display formatting for report values: byte counts, entry counts and
/// timestamps.
///
/// All internal sizes are `u64` bytes and all timestamps are UTC. Floating
/// point and local time only appear at the display-formatting boundary.
use chrono::{DateTime, Local, Utc};

/// Format a byte count into a human-readable string with appropriate unit.
///
/// Uses binary units (KiB = 1024) labelled with the common short forms
/// (KB, MB, GB, TB).
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    const TB: f64 = GB * 1024.0;

    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else if b < GB {
        format!("{:.1} MB", b / MB)
    } else if b < TB {
        format!("{:.2} GB", b / GB)
    } else {
        format!("{:.2} TB", b / TB)
    }
}

/// Format an optional size; directory rows have none and render as `-`.
pub fn format_optional_size(bytes: Option<u64>) -> String {
    bytes.map(format_size).unwrap_or_else(|| "-".to_string())
}

/// Format a file count with thousand separators.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let s = count.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Format a modification time in the viewer's local time zone, `-` when unknown.
pub fn format_timestamp(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "-".to_string(),
    }
}
