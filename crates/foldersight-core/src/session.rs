/// Report session: one selected folder, its report, and the view the
/// user has put on it.
///
/// The tree and report are built once and never change; sort and search
/// only touch the [`ViewState`]. Frontends keep one session per selection
/// and ask it for rows to render.
use crate::analysis::{generate_report, BreakdownOrder, FileMetadata, Report, ReportOptions, TypeShare};
use crate::export::{export_row, ExportError, ExportSink};
use crate::model::{FileNode, FileTree};
use crate::view::{apply_view, SortAttribute, ViewState};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ReportSession {
    tree: FileTree,
    report: Report,
    view: ViewState,
}

impl ReportSession {
    /// Build the tree and report for a selection, with the default view.
    pub fn new(entries: Vec<FileNode>, options: &ReportOptions) -> Self {
        let tree = FileTree::from_entries(entries);
        let report = generate_report(&tree, options);
        Self {
            tree,
            report,
            view: ViewState::default(),
        }
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Replace the whole view, e.g. when restoring it from arguments.
    pub fn set_view(&mut self, view: ViewState) {
        self.view = view;
    }

    /// Column-header click; see [`ViewState::toggle_sort`].
    pub fn toggle_sort(&mut self, attribute: SortAttribute) {
        self.view.toggle_sort(attribute);
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.view.set_search(query);
    }

    /// Metadata rows as the current view presents them.
    pub fn rows(&self) -> Vec<FileMetadata> {
        apply_view(&self.report.file_metadata, &self.view)
    }

    pub fn type_breakdown(&self, order: BreakdownOrder) -> Vec<TypeShare> {
        self.report.type_breakdown(order)
    }

    /// First metadata row whose name or path equals `name`.
    pub fn find_row(&self, name: &str) -> Option<&FileMetadata> {
        self.report
            .file_metadata
            .iter()
            .find(|row| row.name == name || row.path == name)
    }

    /// Export one row through `sink`; see [`export_row`].
    pub fn export(
        &self,
        row: &FileMetadata,
        sink: &mut dyn ExportSink,
    ) -> Result<PathBuf, ExportError> {
        export_row(&self.tree, row, sink)
    }
}
