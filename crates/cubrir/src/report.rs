//! Coverage report statistics.
//!
//! Turns the cumulative record into human-readable usage numbers: per file,
//! how many of its source lines were ever executed, and across all matched
//! files, the overall percentage. Statistics only exist for files whose
//! source text can still be found; keys that no longer resolve are skipped
//! rather than failing the whole report.

use crate::record::{CumulativeRecord, LineSet};
use crate::result::{CubrirError, CubrirResult};
use regex::Regex;
use std::fs;
use std::path::PathBuf;

/// Source text lookup for report rendering.
///
/// The cumulative record stores keys, not contents. Implementations resolve
/// a canonical key back to the file's full text, or `None` when the file
/// cannot be found (renamed, deleted, or generated at runtime) — such files
/// are skipped, never an error.
pub trait SourceLoader {
    /// Full source text behind a canonical key, or `None` to skip the file
    fn load(&self, key: &str) -> Option<String>;
}

/// Loads source files from a configured root directory.
///
/// Canonical keys are expected to be relative to the root, which is what
/// normalization with the matching skip prefix produces.
#[derive(Debug, Clone)]
pub struct FsSourceLoader {
    root: PathBuf,
}

impl FsSourceLoader {
    /// Create a loader resolving keys under `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SourceLoader for FsSourceLoader {
    fn load(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.root.join(key)).ok()
    }
}

/// Usage statistics for one file
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Canonical file key
    pub name: String,
    /// Full source text
    pub source: String,
    /// Covered line numbers, ascending
    pub lines: Vec<u32>,
    /// Number of distinct covered lines
    pub used_lines: usize,
    /// Number of lines in the source text
    pub total_lines: usize,
    /// Covered share in percent, one decimal; `0.0` for an empty file
    pub percent_used: f64,
}

impl FileReport {
    fn new(name: &str, source: String, lines: &LineSet) -> Self {
        let used_lines = lines.len();
        let total_lines = source.lines().count();
        Self {
            name: name.to_string(),
            lines: lines.iter().copied().collect(),
            percent_used: percent(used_lines, total_lines),
            used_lines,
            total_lines,
            source,
        }
    }
}

/// Aggregate usage statistics over all matched files
#[derive(Debug, Clone, Default)]
pub struct CoverageAnalysis {
    /// Per-file statistics, in key order
    pub files: Vec<FileReport>,
    /// Number of files included
    pub num_files: usize,
    /// Covered lines summed over included files
    pub total_used: usize,
    /// Source lines summed over included files
    pub total_lines: usize,
    /// Overall covered share in percent, one decimal; `0.0` when nothing matched
    pub percent_used: f64,
}

/// Covered share in percent, rounded to one decimal. Zero lines is 0.0,
/// not a division error.
fn percent(used: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = used as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

/// Build usage statistics for every file in `record` whose key matches
/// `pattern`.
///
/// The pattern matches anywhere in the key (no implicit anchors), so
/// `"src/"` selects everything under `src/`; anchor explicitly for exact
/// matches. Matched keys whose source cannot be loaded are skipped. Stale
/// records can legitimately report more covered lines than the current
/// source has; percentages above 100 are left as computed.
pub fn analyze(
    record: &CumulativeRecord,
    pattern: &str,
    sources: &impl SourceLoader,
) -> CubrirResult<CoverageAnalysis> {
    let filter = Regex::new(pattern).map_err(|err| CubrirError::invalid_filter(err.to_string()))?;

    let mut analysis = CoverageAnalysis::default();
    for (key, lines) in record.iter() {
        if !filter.is_match(key) {
            continue;
        }
        let source = match sources.load(key) {
            Some(source) => source,
            None => {
                tracing::debug!(key = %key, "source not found, skipping file in report");
                continue;
            }
        };
        let report = FileReport::new(key, source, lines);
        analysis.total_used += report.used_lines;
        analysis.total_lines += report.total_lines;
        analysis.files.push(report);
    }
    analysis.num_files = analysis.files.len();
    analysis.percent_used = percent(analysis.total_used, analysis.total_lines);
    Ok(analysis)
}
