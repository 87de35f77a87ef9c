/// Sort/filter view over the report's metadata rows.
///
/// The presentation layer owns a [`ViewState`] and passes it in explicitly;
/// nothing here touches the report's counts.
pub mod filter;
pub mod sort;

pub use filter::{filter_rows, matches_query};
pub use sort::{compare_rows, locale_compare, sort_rows};

use crate::analysis::FileMetadata;
use std::fmt;
use std::str::FromStr;

/// Column the metadata table is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortAttribute {
    #[default]
    Name,
    Size,
    LastModified,
}

impl SortAttribute {
    /// Column header label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Size => "Size",
            Self::LastModified => "Last Modified",
        }
    }
}

impl FromStr for SortAttribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "size" => Ok(Self::Size),
            "modified" | "lastModifiedDate" => Ok(Self::LastModified),
            other => Err(format!(
                "unknown sort attribute `{other}` (expected name, size or modified)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Arrow shown next to the active column header.
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// User-controlled presentation of the metadata rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub sort_attribute: SortAttribute,
    pub sort_order: SortOrder,
    pub search_query: String,
}

impl ViewState {
    /// Column-header click: the active column flips its order, any other
    /// column becomes active in ascending order.
    pub fn toggle_sort(&mut self, attribute: SortAttribute) {
        if self.sort_attribute == attribute {
            self.sort_order = self.sort_order.reversed();
        } else {
            self.sort_attribute = attribute;
            self.sort_order = SortOrder::Asc;
        }
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }
}

/// Rows to render: sorted by the view's column and order, then filtered
/// by its search query.
///
/// Takes the rows by reference and returns a fresh vector, so calling it
/// repeatedly with the same inputs always yields the same sequence.
pub fn apply_view(rows: &[FileMetadata], view: &ViewState) -> Vec<FileMetadata> {
    let mut sorted = rows.to_vec();
    sort_rows(&mut sorted, view.sort_attribute, view.sort_order);
    filter_rows(sorted, &view.search_query)
}
