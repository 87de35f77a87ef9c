//! Command-line arguments and their mapping onto the core option types.

use clap::{Parser, ValueEnum};
use foldersight_core::analysis::{BreakdownOrder, MetadataScope, ReportOptions};
use foldersight_core::model::ValidationPolicy;
use foldersight_core::scanner::ScanOptions;
use foldersight_core::view::{SortAttribute, SortOrder, ViewState};
use std::path::PathBuf;

/// Which entries get a row in the metadata table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scope {
    /// Top-level entries of the folder, folders included
    TopLevel,
    /// Every file at any depth
    AllFiles,
}

#[derive(Parser, Debug)]
#[command(
    name = "foldersight",
    version,
    about = "Report on a folder: file counts by type, per-file metadata, search, sort and download"
)]
pub struct Args {
    /// Folder to report on (or a JSON descriptor file with --descriptor)
    pub path: PathBuf,

    /// Treat PATH as a JSON descriptor of the folder instead of scanning it
    #[arg(long)]
    pub descriptor: bool,

    /// Reject malformed descriptor nodes instead of filling in defaults
    #[arg(long, requires = "descriptor")]
    pub strict: bool,

    /// Which entries become metadata rows
    #[arg(long, value_enum, default_value_t = Scope::TopLevel)]
    pub scope: Scope,

    /// Sort column: name, size or modified
    #[arg(long, default_value = "name")]
    pub sort: SortAttribute,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Only list entries whose name contains this text (case-insensitive)
    #[arg(long, default_value = "")]
    pub search: String,

    /// List file types by count instead of first appearance
    #[arg(long)]
    pub by_count: bool,

    /// Print the report as JSON instead of the text layout
    #[arg(long)]
    pub json: bool,

    /// Also write the listed rows to a CSV file
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Download the named entry (repeatable); needs --to
    #[arg(long, value_name = "NAME", requires = "to")]
    pub download: Vec<String>,

    /// Directory downloads are saved into
    #[arg(long, value_name = "DIR")]
    pub to: Option<PathBuf>,

    /// Read file contents during the scan instead of at download time
    #[arg(long)]
    pub load_contents: bool,

    /// Skip hidden files and folders while scanning
    #[arg(long)]
    pub skip_hidden: bool,

    /// Follow symbolic links while scanning
    #[arg(long)]
    pub follow_links: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            metadata_scope: match self.scope {
                Scope::TopLevel => MetadataScope::TopLevel,
                Scope::AllFiles => MetadataScope::AllFiles,
            },
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            skip_hidden: self.skip_hidden,
            follow_links: self.follow_links,
            load_contents: self.load_contents,
        }
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        if self.strict {
            ValidationPolicy::Strict
        } else {
            ValidationPolicy::Lenient
        }
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            sort_attribute: self.sort,
            sort_order: if self.desc {
                SortOrder::Desc
            } else {
                SortOrder::Asc
            },
            search_query: self.search.clone(),
        }
    }

    pub fn breakdown_order(&self) -> BreakdownOrder {
        if self.by_count {
            BreakdownOrder::CountDescending
        } else {
            BreakdownOrder::FirstSeen
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_original_layout() {
        let args = Args::parse_from(["foldersight", "some/dir"]);
        assert_eq!(args.view_state(), ViewState::default());
        assert_eq!(args.report_options().metadata_scope, MetadataScope::TopLevel);
        assert_eq!(args.validation_policy(), ValidationPolicy::Lenient);
        assert_eq!(args.breakdown_order(), BreakdownOrder::FirstSeen);
    }

    #[test]
    fn view_flags_map_onto_view_state() {
        let args = Args::parse_from([
            "foldersight",
            "dir",
            "--sort",
            "size",
            "--desc",
            "--search",
            "Rep",
            "--scope",
            "all-files",
        ]);
        let view = args.view_state();
        assert_eq!(view.sort_attribute, SortAttribute::Size);
        assert_eq!(view.sort_order, SortOrder::Desc);
        assert_eq!(view.search_query, "Rep");
        assert_eq!(args.report_options().metadata_scope, MetadataScope::AllFiles);
    }

    #[test]
    fn unknown_sort_column_is_rejected() {
        assert!(Args::try_parse_from(["foldersight", "dir", "--sort", "colour"]).is_err());
    }

    #[test]
    fn download_needs_a_target_directory() {
        assert!(Args::try_parse_from(["foldersight", "dir", "--download", "a.txt"]).is_err());
        let args =
            Args::try_parse_from(["foldersight", "dir", "--download", "a.txt", "--to", "out"])
                .unwrap();
        assert_eq!(args.download, ["a.txt"]);
    }

    #[test]
    fn strict_needs_descriptor() {
        assert!(Args::try_parse_from(["foldersight", "dir", "--strict"]).is_err());
    }
}
