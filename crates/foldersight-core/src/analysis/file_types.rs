/// Per-extension counting and the type breakdown shown in the report.
///
/// The grouping key is the raw substring after the last `.` of a file
/// name. Keys are case-sensitive: `a.txt` and `b.TXT` land in different
/// groups.
use super::percentage::percentage;
use compact_str::CompactString;
use serde::Serialize;

/// Extension used as the grouping key for `name`.
///
/// A name without a `.` is its own "extension"; a trailing `.` yields the
/// empty string.
#[inline]
pub fn extension_of(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(_, ext)| ext)
}

/// Number of files observed for one extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub extension: CompactString,
    pub count: u64,
}

/// One row of the rendered breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeShare {
    pub extension: CompactString,
    pub count: u64,
    /// Share of all counted files, rounded to two decimals.
    pub percentage: f64,
}

/// Row order for [`type_breakdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakdownOrder {
    /// Order in which each extension was first met during traversal.
    #[default]
    FirstSeen,
    /// Largest count first; ties keep first-seen order.
    CountDescending,
}

/// Attach percentages to per-extension counts.
///
/// The denominator is the sum of the counts themselves. An empty input
/// gives an empty breakdown, so the zero-total case never reaches
/// [`percentage`].
pub fn type_breakdown(counts: &[TypeCount], order: BreakdownOrder) -> Vec<TypeShare> {
    let total: u64 = counts.iter().map(|c| c.count).sum();
    let mut rows: Vec<TypeShare> = counts
        .iter()
        .filter_map(|c| {
            percentage(c.count, total).map(|percentage| TypeShare {
                extension: c.extension.clone(),
                count: c.count,
                percentage,
            })
        })
        .collect();

    if order == BreakdownOrder::CountDescending {
        rows.sort_by(|a, b| b.count.cmp(&a.count));
    }
    rows
}

/// Best-effort MIME type for a file name, used when the picker did not
/// declare one.
///
/// Extensions are lowercased into a fixed-size stack buffer (`[u8; 16]`)
/// rather than a `String`; longer extensions are unknown.
pub fn guess_mime_type(name: &str) -> Option<&'static str> {
    let ext = name.rsplit_once('.')?.1;
    let bytes = ext.as_bytes();
    if bytes.is_empty() || bytes.len() > 16 {
        return None;
    }

    let mut lower = [0u8; 16];
    for (dest, &src) in lower.iter_mut().zip(bytes.iter()) {
        *dest = src.to_ascii_lowercase();
    }
    let lower_str = std::str::from_utf8(&lower[..bytes.len()]).ok()?;

    let mime = match lower_str {
        // Text
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" | "mjs" => "text/javascript",
        "xml" => "application/xml",
        "json" => "application/json",
        "yaml" | "yml" => "application/yaml",
        "toml" => "application/toml",
        // Documents
        "pdf" => "application/pdf",
        "rtf" => "application/rtf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "odt" => "application/vnd.oasis.opendocument.text",
        "epub" => "application/epub+zip",
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/vnd.microsoft.icon",
        "tif" | "tiff" => "image/tiff",
        "heic" => "image/heic",
        // Video
        "mp4" | "m4v" => "video/mp4",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mpg" | "mpeg" => "video/mpeg",
        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        "opus" => "audio/opus",
        // Archives
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "7z" => "application/x-7z-compressed",
        "rar" => "application/vnd.rar",
        "bz2" => "application/x-bzip2",
        "xz" => "application/x-xz",
        "zst" => "application/zstd",
        _ => return None,
    };
    Some(mime)
}
