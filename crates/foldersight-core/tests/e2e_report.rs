/// End-to-end report tests.
///
/// These tests exercise the real scanner against a temporary directory and
/// push its output through the aggregation engine, the sort/filter view
/// and the export sink, the same path a frontend takes. No mocking.
use foldersight_core::analysis::{BreakdownOrder, MetadataScope, ReportOptions};
use foldersight_core::export::{write_metadata_csv, DirectorySink, ExportError};
use foldersight_core::model::{parse_descriptor, ValidationPolicy};
use foldersight_core::scanner::{scan_folder, ScanOptions};
use foldersight_core::view::{SortAttribute, SortOrder, ViewState};
use foldersight_core::{ReportError, ReportSession};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Create a reproducible directory tree:
///
/// ```text
/// root/
///   alpha/
///     a.txt   (100 bytes)
///     b.rs    (200 bytes)
///   beta/
///     c.png   (300 bytes)
///     empty/
///   d.zip     (400 bytes)
///   E.TXT     (50 bytes)
/// ```
fn build_test_tree(root: &Path) {
    let alpha = root.join("alpha");
    let beta = root.join("beta");
    fs::create_dir_all(&alpha).unwrap();
    fs::create_dir_all(beta.join("empty")).unwrap();

    write_bytes(&alpha.join("a.txt"), 100);
    write_bytes(&alpha.join("b.rs"), 200);
    write_bytes(&beta.join("c.png"), 300);
    write_bytes(&root.join("d.zip"), 400);
    write_bytes(&root.join("E.TXT"), 50);
}

fn write_bytes(path: &Path, n: usize) {
    let mut f = fs::File::create(path).unwrap();
    f.write_all(&vec![b'x'; n]).unwrap();
}

fn scan(root: &Path, options: &ScanOptions, report: &ReportOptions) -> ReportSession {
    let outcome = scan_folder(root, options).expect("scan failed");
    assert_eq!(outcome.error_count, 0);
    ReportSession::new(outcome.entries, report)
}

fn names(session: &ReportSession) -> Vec<String> {
    session.rows().iter().map(|r| r.name.to_string()).collect()
}

// ── Scan + aggregate ─────────────────────────────────────────────────────────

#[test]
fn scanned_folder_counts_every_depth() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_test_tree(tmp.path());

    let session = scan(tmp.path(), &ScanOptions::default(), &ReportOptions::default());
    let report = session.report();

    assert_eq!(report.total_files, 5);
    // alpha, beta, beta/empty; the selected folder itself is not an entry.
    assert_eq!(report.total_folders, 3);
    assert_eq!(report.total_size, 1_050);
    assert_eq!(report.count_for("txt"), 1);
    assert_eq!(report.count_for("TXT"), 1);
    assert_eq!(report.count_for("png"), 1);
}

#[test]
fn top_level_rows_include_folders_without_size() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_test_tree(tmp.path());

    let session = scan(tmp.path(), &ScanOptions::default(), &ReportOptions::default());
    assert_eq!(names(&session), ["alpha", "beta", "d.zip", "E.TXT"]);

    let alpha = session.find_row("alpha").unwrap();
    assert!(alpha.is_dir);
    assert_eq!(alpha.size, None);
    let zip = session.find_row("d.zip").unwrap();
    assert_eq!(zip.size, Some(400));
    assert!(zip.last_modified.is_some());
}

#[test]
fn all_files_scope_lists_nested_files() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_test_tree(tmp.path());

    let options = ReportOptions {
        metadata_scope: MetadataScope::AllFiles,
    };
    let mut session = scan(tmp.path(), &ScanOptions::default(), &options);
    session.set_view(ViewState {
        sort_attribute: SortAttribute::Size,
        sort_order: SortOrder::Desc,
        search_query: String::new(),
    });
    assert_eq!(names(&session), ["d.zip", "c.png", "b.rs", "a.txt", "E.TXT"]);

    let paths: Vec<String> = session.rows().into_iter().map(|r| r.path).collect();
    assert!(paths.contains(&"beta/c.png".to_string()));
}

#[test]
fn breakdown_covers_all_files() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_test_tree(tmp.path());

    let session = scan(tmp.path(), &ScanOptions::default(), &ReportOptions::default());
    let rows = session.type_breakdown(BreakdownOrder::FirstSeen);
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r.percentage == 20.0));
}

#[test]
fn empty_folder_gives_empty_report() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let session = scan(tmp.path(), &ScanOptions::default(), &ReportOptions::default());
    assert!(session.report().is_empty());
    assert!(session.rows().is_empty());
    assert!(session.type_breakdown(BreakdownOrder::FirstSeen).is_empty());
}

#[test]
fn hidden_entries_can_be_skipped() {
    // Default temp dir names start with a dot themselves.
    let tmp = tempfile::Builder::new()
        .prefix("scan")
        .tempdir()
        .expect("failed to create temp dir");
    write_bytes(&tmp.path().join("visible.txt"), 1);
    write_bytes(&tmp.path().join(".hidden"), 1);

    let all = scan(tmp.path(), &ScanOptions::default(), &ReportOptions::default());
    assert_eq!(all.report().total_files, 2);

    let options = ScanOptions {
        skip_hidden: true,
        ..ScanOptions::default()
    };
    let visible = scan(tmp.path(), &options, &ReportOptions::default());
    assert_eq!(visible.report().total_files, 1);
}

#[test]
fn scanning_a_file_is_rejected() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let file = tmp.path().join("plain.txt");
    write_bytes(&file, 3);
    assert!(matches!(
        scan_folder(&file, &ScanOptions::default()),
        Err(ReportError::NotADirectory(_))
    ));
}

/// A scan and a descriptor describing the same folder must agree.
#[test]
fn scan_matches_equivalent_descriptor() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_test_tree(tmp.path());
    let scanned = scan(tmp.path(), &ScanOptions::default(), &ReportOptions::default());

    let descriptor = r#"[
        { "name": "alpha", "isDirectory": true, "children": [
            { "name": "a.txt", "size": 100 }, { "name": "b.rs", "size": 200 } ] },
        { "name": "beta", "isDirectory": true, "children": [
            { "name": "c.png", "size": 300 },
            { "name": "empty", "isDirectory": true, "children": [] } ] },
        { "name": "d.zip", "size": 400 },
        { "name": "E.TXT", "size": 50 }
    ]"#;
    let entries = parse_descriptor(descriptor, ValidationPolicy::Strict).unwrap();
    let described = ReportSession::new(entries, &ReportOptions::default());

    let (a, b) = (scanned.report(), described.report());
    assert_eq!(a.total_files, b.total_files);
    assert_eq!(a.total_folders, b.total_folders);
    assert_eq!(a.total_size, b.total_size);
    // First-seen order differs (the scan sorts bytewise, so `E.TXT` comes
    // first); the counts themselves must not.
    let counts = |r: &foldersight_core::analysis::Report| -> BTreeMap<String, u64> {
        r.file_counts_by_type
            .iter()
            .map(|c| (c.extension.to_string(), c.count))
            .collect()
    };
    assert_eq!(counts(a), counts(b));
    assert_eq!(names(&scanned), names(&described));
}

// ── Export ───────────────────────────────────────────────────────────────────

#[test]
fn lazily_scanned_file_exports_from_disk() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_test_tree(tmp.path());
    let downloads = TempDir::new().expect("failed to create download dir");

    let session = scan(tmp.path(), &ScanOptions::default(), &ReportOptions::default());
    let row = session.find_row("d.zip").unwrap().clone();
    let mut sink = DirectorySink::new(downloads.path());

    let path = session.export(&row, &mut sink).expect("export failed");
    assert_eq!(path, downloads.path().join("d.zip"));
    assert_eq!(fs::read(&path).unwrap().len(), 400);

    // Nothing but the artifact is left in the download directory.
    let leftover: Vec<_> = fs::read_dir(downloads.path()).unwrap().collect();
    assert_eq!(leftover.len(), 1);
}

#[test]
fn eagerly_loaded_file_survives_source_removal() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_test_tree(tmp.path());
    let downloads = TempDir::new().expect("failed to create download dir");

    let options = ScanOptions {
        load_contents: true,
        ..ScanOptions::default()
    };
    let session = scan(tmp.path(), &options, &ReportOptions::default());
    fs::remove_file(tmp.path().join("E.TXT")).unwrap();

    let row = session.find_row("E.TXT").unwrap().clone();
    let path = session
        .export(&row, &mut DirectorySink::new(downloads.path()))
        .expect("export failed");
    assert_eq!(fs::read(path).unwrap(), vec![b'x'; 50]);
}

#[test]
fn folder_row_export_fails_without_side_effects() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_test_tree(tmp.path());
    let downloads = TempDir::new().expect("failed to create download dir");

    let session = scan(tmp.path(), &ScanOptions::default(), &ReportOptions::default());
    let before = session.report().clone();
    let row = session.find_row("alpha").unwrap().clone();

    let err = session
        .export(&row, &mut DirectorySink::new(downloads.path()))
        .unwrap_err();
    assert!(matches!(err, ExportError::Directory(_)));
    assert_eq!(fs::read_dir(downloads.path()).unwrap().count(), 0);
    assert_eq!(session.report(), &before);
}

#[test]
fn csv_export_follows_the_view() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_test_tree(tmp.path());

    let mut session = scan(tmp.path(), &ScanOptions::default(), &ReportOptions::default());
    session.set_search(".t");

    let mut out = Vec::new();
    write_metadata_csv(&session.rows(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2, "header plus E.TXT: {text}");
    assert!(lines[1].starts_with("E.TXT,E.TXT,50,"));
}
