//! Per-file orchestration: guard, read, check, convert, write

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::PowerConfig;
use crate::digest::{Stamp, content_digest, read_output_hash};
use crate::discover::{is_output_file, output_path};
use crate::error::{ConvertError, Result};
use crate::transducer::{SkipReason, transduce, validate_header};

/// Switches that change how a file is processed
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// Convert even when the existing output is up to date
    pub force: bool,
    /// Convert but do not write the output
    pub dry_run: bool,
}

/// What happened to one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The program was converted. `output` was written unless this was a dry run.
    Converted { output: PathBuf, program: String },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub source: PathBuf,
    pub outcome: FileOutcome,
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            FileOutcome::Converted { output, .. } => write!(
                f,
                "converted {} -> {}",
                self.source.display(),
                output.display()
            ),
            FileOutcome::Skipped(reason) => {
                write!(f, "skip {} {}", self.source.display(), reason)
            }
        }
    }
}

/// Convert one source file next to itself
pub fn process_file(
    source: impl AsRef<Path>,
    config: &PowerConfig,
    options: &ProcessOptions,
) -> Result<FileReport> {
    let source = source.as_ref();
    let report = |outcome| FileReport {
        source: source.to_path_buf(),
        outcome,
    };

    if is_output_file(source) {
        debug!(path = %source.display(), "ignoring converted output");
        return Ok(report(FileOutcome::Skipped(SkipReason::OwnOutput)));
    }

    let bytes = fs::read(source).map_err(|e| ConvertError::io(source, e))?;
    let digest = content_digest(&bytes);
    let content = String::from_utf8(bytes).map_err(|e| ConvertError::NotText {
        path: source.to_path_buf(),
        source: e,
    })?;
    if let Err(reason) = validate_header(&content) {
        return Ok(report(FileOutcome::Skipped(reason)));
    }

    let output = output_path(source);
    if !options.force && read_output_hash(&output).as_deref() == Some(digest.as_str()) {
        return Ok(report(FileOutcome::Skipped(SkipReason::UpToDate)));
    }

    debug!(path = %source.display(), digest = %digest, "converting");
    let stamp = Stamp::new(digest);
    let program = transduce(&content, *config, Some(&stamp))?;

    if !options.dry_run {
        write_atomic(&output, &program)?;
    }
    Ok(report(FileOutcome::Converted { output, program }))
}

/// Process every path, one result per path.
///
/// With `fail_fast` the run stops after the first failing file.
pub fn process_all<P: AsRef<Path>>(
    paths: &[P],
    config: &PowerConfig,
    options: &ProcessOptions,
    fail_fast: bool,
) -> Vec<Result<FileReport>> {
    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        let result = process_file(path, config, options);
        let failed = result.is_err();
        results.push(result);
        if failed && fail_fast {
            break;
        }
    }
    results
}

/// Replace `dest` with `content` in one step.
///
/// Content goes to a temporary file in the destination directory first, so a
/// failed write never leaves a truncated program behind.
fn write_atomic(dest: &Path, content: &str) -> Result<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ConvertError::io(dir, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| ConvertError::io(tmp.path(), e))?;
    tmp.persist(dest)
        .map_err(|e| ConvertError::io(dest, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_own_output_skipped_without_reading() {
        let report = process_file(
            "/nonexistent/job_UCCNC.nc",
            &PowerConfig::default(),
            &ProcessOptions::default(),
        )
        .unwrap();
        assert_eq!(report.outcome, FileOutcome::Skipped(SkipReason::OwnOutput));
    }

    #[test]
    fn test_missing_source_is_io_error() {
        let err = process_file(
            "/nonexistent/job.nc",
            &PowerConfig::default(),
            &ProcessOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
    }

    #[test]
    fn test_binary_source_is_not_text_error() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("image.nc");
        fs::write(&source, b"; LightBurn \xff\xfe\n").unwrap();

        let err = process_file(&source, &PowerConfig::default(), &ProcessOptions::default())
            .unwrap_err();
        assert!(matches!(err, ConvertError::NotText { .. }));
        assert!(err.to_string().contains("offset 12"));
        assert!(!output_path(&source).exists());
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out_UCCNC.nc");
        fs::write(&dest, "old contents that are longer\n").unwrap();
        write_atomic(&dest, "new\n").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "new\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_report_display() {
        let report = FileReport {
            source: PathBuf::from("a.nc"),
            outcome: FileOutcome::Skipped(SkipReason::UpToDate),
        };
        assert_eq!(report.to_string(), "skip a.nc already processed");
    }
}
