//! Candidate file discovery and output naming

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::Result;

/// Suffix that replaces a source file's extension in its output name
pub const OUTPUT_SUFFIX: &str = "_UCCNC.nc";

/// Pattern used when no files are named on the command line
pub const DEFAULT_PATTERN: &str = "*.nc";

/// Output path for a source: `<stem>_UCCNC.nc` in the same directory
pub fn output_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("{stem}{OUTPUT_SUFFIX}"))
}

/// True for files this tool wrote itself
pub fn is_output_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(OUTPUT_SUFFIX))
        .unwrap_or(false)
}

/// Recursively collect files under `root` whose name matches `pattern`.
///
/// Converted outputs are never returned. Order is deterministic.
pub fn walk_match(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(pattern)?;
    let mut matches = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if pattern.matches(&name) && !is_output_file(entry.path()) {
            matches.push(entry.into_path());
        }
    }
    Ok(matches)
}
