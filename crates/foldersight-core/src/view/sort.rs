/// Comparators for the metadata table.
use super::{SortAttribute, SortOrder};
use crate::analysis::FileMetadata;
use std::cmp::Ordering;

/// Locale-style name ordering.
///
/// Case-insensitive first, so `apple` and `Banana` interleave the way a
/// reader expects; among names equal ignoring case, lowercase sorts first.
/// Only identical strings compare `Equal`.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a
        .cmp(folded_b)
        .then_with(|| lowercase_first(a, b))
        .then_with(|| a.cmp(b))
}

/// At the first position where the names differ, a lowercase letter sorts
/// before an uppercase one.
fn lowercase_first(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x != y {
            return match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => Ordering::Equal,
            };
        }
    }
    Ordering::Equal
}

/// Ascending comparison of two rows on one column.
///
/// Rows without a size or timestamp (directories, unknown times) sort
/// before every row that has one.
pub fn compare_rows(a: &FileMetadata, b: &FileMetadata, attribute: SortAttribute) -> Ordering {
    match attribute {
        SortAttribute::Size => a.size.cmp(&b.size),
        SortAttribute::LastModified => a.last_modified.cmp(&b.last_modified),
        SortAttribute::Name => locale_compare(&a.name, &b.name),
    }
}

/// Stable in-place sort. `Desc` swaps the operands instead of negating the
/// result, so rows with equal keys keep their relative order either way.
pub fn sort_rows(rows: &mut [FileMetadata], attribute: SortAttribute, order: SortOrder) {
    rows.sort_by(|a, b| match order {
        SortOrder::Asc => compare_rows(a, b, attribute),
        SortOrder::Desc => compare_rows(b, a, attribute),
    });
}
