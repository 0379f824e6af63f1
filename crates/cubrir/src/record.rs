//! Coverage record types.
//!
//! Two shapes of the same information live side by side:
//!
//! - [`RawSnapshot`] is what a line-level profiler hands over when a run
//!   stops: raw file identifiers mapped to per-line hit markers, in whatever
//!   iteration order the profiler produced.
//! - [`CumulativeRecord`] is the durable shape: canonical file keys mapped to
//!   the union of every line ever observed executed, ordered so that encoding
//!   the same record always yields the same bytes.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Per-line hit markers for one file, as emitted by the profiler.
///
/// Marker values are opaque; only the presence of a line number matters.
pub type LineHits = HashMap<u32, i64>;

/// One run's coverage in the profiler's native shape: raw file identifier
/// to line hit markers.
pub type RawSnapshot = HashMap<String, LineHits>;

/// Set of line numbers observed executed in one file, ascending.
pub type LineSet = BTreeSet<u32>;

/// Cumulative line coverage across every run so far.
///
/// Keys are canonical file keys (see [`crate::normalize`]); iteration is
/// lexicographic by key, which keeps the persisted form deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CumulativeRecord {
    files: BTreeMap<String, LineSet>,
}

impl CumulativeRecord {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single line as covered for a file
    pub fn mark(&mut self, file: &str, line: u32) {
        self.files.entry(file.to_string()).or_default().insert(line);
    }

    /// Record every line in `lines` as covered for a file.
    ///
    /// The file entry is created even when `lines` is empty, so a file that
    /// was touched without any recorded lines still appears in the record.
    pub fn mark_all<I>(&mut self, file: &str, lines: I)
    where
        I: IntoIterator<Item = u32>,
    {
        self.files.entry(file.to_string()).or_default().extend(lines);
    }

    /// Check if a specific line was ever covered
    #[must_use]
    pub fn contains(&self, file: &str, line: u32) -> bool {
        self.files.get(file).is_some_and(|lines| lines.contains(&line))
    }

    /// Covered lines for a file, if the file is present
    #[must_use]
    pub fn lines(&self, file: &str) -> Option<&LineSet> {
        self.files.get(file)
    }

    /// Iterate files and their covered lines in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &LineSet)> {
        self.files.iter()
    }

    /// Number of files in the record
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Total number of covered lines across all files
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.files.values().map(BTreeSet::len).sum()
    }

    /// Check if the record holds no files at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_empty() {
        let record = CumulativeRecord::new();
        assert!(record.is_empty());
        assert_eq!(record.file_count(), 0);
        assert_eq!(record.line_count(), 0);
    }

    #[test]
    fn test_mark_records_line() {
        let mut record = CumulativeRecord::new();
        record.mark("src/app.py", 10);
        assert!(record.contains("src/app.py", 10));
        assert!(!record.contains("src/app.py", 11));
        assert!(!record.contains("src/other.py", 10));
    }

    #[test]
    fn test_mark_is_idempotent() {
        let mut record = CumulativeRecord::new();
        record.mark("a.py", 5);
        record.mark("a.py", 5);
        assert_eq!(record.line_count(), 1);
    }

    #[test]
    fn test_mark_all_creates_entry_for_empty_lines() {
        let mut record = CumulativeRecord::new();
        record.mark_all("touched.py", std::iter::empty());
        assert_eq!(record.file_count(), 1);
        assert_eq!(record.line_count(), 0);
        assert!(record.lines("touched.py").is_some());
    }

    #[test]
    fn test_lines_are_sorted_ascending() {
        let mut record = CumulativeRecord::new();
        record.mark_all("a.py", [30, 10, 20]);
        let lines: Vec<u32> = record.lines("a.py").map(|set| set.iter().copied().collect()).unwrap_or_default();
        assert_eq!(lines, vec![10, 20, 30]);
    }

    #[test]
    fn test_iteration_is_lexicographic_by_key() {
        let mut record = CumulativeRecord::new();
        record.mark("zeta.py", 1);
        record.mark("alpha.py", 1);
        record.mark("mid.py", 1);
        let keys: Vec<&String> = record.iter().map(|(file, _)| file).collect();
        assert_eq!(keys, vec!["alpha.py", "mid.py", "zeta.py"]);
    }

    #[test]
    fn test_line_count_sums_across_files() {
        let mut record = CumulativeRecord::new();
        record.mark_all("a.py", [1, 2, 3]);
        record.mark_all("b.py", [7]);
        assert_eq!(record.file_count(), 2);
        assert_eq!(record.line_count(), 4);
    }
}
