/// Analysis modules: the aggregation engine and the numbers derived from it.
pub mod aggregate;
pub mod file_types;
pub mod percentage;

pub use aggregate::{generate_report, metadata_for, FileMetadata, MetadataScope, Report, ReportOptions};
pub use file_types::{extension_of, guess_mime_type, type_breakdown, BreakdownOrder, TypeCount, TypeShare};
pub use percentage::{format_percentage, percentage};
