/// FolderSight Core: report engine, data model, and export.
///
/// This crate contains all business logic with zero UI dependencies.
/// Frontends supply the selected folder as a tree of [`model::FileNode`]s
/// and render what comes back.
///
/// # Modules
///
/// - [`model`]: `FileNode` input shape, arena `FileTree`, JSON descriptor loader.
/// - [`analysis`]: Aggregation engine, per-extension breakdown, percentages.
/// - [`view`]: Sort/filter view driven by an explicit `ViewState`.
/// - [`export`]: Per-file download artifacts and table exports.
/// - [`scanner`]: Folder picker that walks a real directory.
/// - [`session`]: One selection's tree, report, and view held together.
pub mod analysis;
pub mod error;
pub mod export;
pub mod model;
pub mod scanner;
pub mod session;
pub mod view;

pub use error::{ReportError, Result};
pub use session::ReportSession;
