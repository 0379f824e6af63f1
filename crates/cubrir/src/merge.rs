//! Snapshot aggregation.
//!
//! One short-lived run sees one slice of the codebase. Aggregation folds
//! that slice into everything earlier runs saw: a per-file union of line
//! sets, keyed by canonical file key. Lines only ever accumulate; no merge
//! can remove a line that any prior run recorded.

use crate::normalize::normalize;
use crate::record::{CumulativeRecord, RawSnapshot};

/// Fold a freshly captured snapshot into the previously accumulated record.
///
/// Raw identifiers are normalized with `skip_prefix` first; raw keys that
/// collapse to the same canonical key union their lines with each other as
/// well as with history. Files present only in `previous` carry forward
/// untouched. Neither input is modified.
#[must_use]
pub fn merge(
    fresh: &RawSnapshot,
    skip_prefix: &str,
    previous: &CumulativeRecord,
) -> CumulativeRecord {
    let mut merged = previous.clone();
    for (raw_key, hits) in fresh {
        let key = normalize(raw_key, skip_prefix);
        merged.mark_all(&key, hits.keys().copied());
    }
    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::record::LineHits;

    fn snapshot(entries: &[(&str, &[u32])]) -> RawSnapshot {
        entries
            .iter()
            .map(|(file, lines)| {
                let hits: LineHits = lines.iter().map(|&line| (line, 1)).collect();
                ((*file).to_string(), hits)
            })
            .collect()
    }

    fn lines_of(record: &CumulativeRecord, file: &str) -> Vec<u32> {
        record
            .lines(file)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_empty_snapshot_returns_previous_unchanged() {
        let mut previous = CumulativeRecord::new();
        previous.mark_all("a.py", [1, 2]);
        let merged = merge(&RawSnapshot::new(), "", &previous);
        assert_eq!(merged, previous);
    }

    #[test]
    fn test_first_run_against_empty_history() {
        let fresh = snapshot(&[("/app/a.py", &[3, 1])]);
        let merged = merge(&fresh, "/app/", &CumulativeRecord::new());
        assert_eq!(lines_of(&merged, "a.py"), vec![1, 3]);
        assert_eq!(merged.file_count(), 1);
    }

    #[test]
    fn test_overlapping_file_unions_lines() {
        let mut previous = CumulativeRecord::new();
        previous.mark_all("a.py", [1, 2]);
        let fresh = snapshot(&[("a.py", &[2, 3])]);
        let merged = merge(&fresh, "", &previous);
        assert_eq!(lines_of(&merged, "a.py"), vec![1, 2, 3]);
    }

    #[test]
    fn test_history_only_file_carries_forward() {
        let mut previous = CumulativeRecord::new();
        previous.mark_all("old.py", [10]);
        let fresh = snapshot(&[("new.py", &[5])]);
        let merged = merge(&fresh, "", &previous);
        assert_eq!(lines_of(&merged, "old.py"), vec![10]);
        assert_eq!(lines_of(&merged, "new.py"), vec![5]);
    }

    #[test]
    fn test_raw_keys_collapsing_to_one_canonical_key_union() {
        let fresh = snapshot(&[
            ("a/b/Foo.py", &[1, 2]),
            ("a/b/Foo.py(eval'd code)", &[2, 9]),
        ]);
        let merged = merge(&fresh, "a/b/", &CumulativeRecord::new());
        assert_eq!(merged.file_count(), 1);
        assert_eq!(lines_of(&merged, "Foo.py"), vec![1, 2, 9]);
    }

    #[test]
    fn test_file_with_no_hit_lines_still_appears() {
        let fresh = snapshot(&[("empty.py", &[])]);
        let merged = merge(&fresh, "", &CumulativeRecord::new());
        assert_eq!(merged.file_count(), 1);
        assert!(merged.lines("empty.py").unwrap().is_empty());
    }

    #[test]
    fn test_hit_marker_values_are_ignored() {
        let mut fresh = RawSnapshot::new();
        fresh.insert("a.py".to_string(), LineHits::from([(4, -2), (7, 999)]));
        let merged = merge(&fresh, "", &CumulativeRecord::new());
        assert_eq!(lines_of(&merged, "a.py"), vec![4, 7]);
    }

    #[test]
    fn test_inputs_are_not_modified() {
        let mut previous = CumulativeRecord::new();
        previous.mark("a.py", 1);
        let fresh = snapshot(&[("a.py", &[2])]);
        let _ = merge(&fresh, "", &previous);
        assert!(!previous.contains("a.py", 2));
        assert_eq!(fresh.len(), 1);
    }
}
