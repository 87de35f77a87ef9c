/// Search-box filtering of metadata rows.
use crate::analysis::FileMetadata;

/// Case-insensitive substring match of `query` against `name`.
/// An empty query matches everything.
pub fn matches_query(name: &str, query: &str) -> bool {
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

/// Keep the rows whose name matches `query`, preserving their order.
pub fn filter_rows(mut rows: Vec<FileMetadata>, query: &str) -> Vec<FileMetadata> {
    if !query.is_empty() {
        rows.retain(|row| matches_query(&row.name, query));
    }
    rows
}
