//! Canonical file key derivation.
//!
//! Profilers report synthetic frames (eval'd code, runtime-created closures)
//! by decorating the real path, e.g. `src/App.py(eval'd code)`. Normalization
//! strips the decoration and the configured root prefix so that every run
//! yields the same key for the same file, no matter which process or working
//! directory produced the snapshot.

/// Decoration opens with the first `(` in the raw identifier.
const DECORATION_MARKER: char = '(';

/// Derive the canonical file key for a raw profiler identifier.
///
/// Keeps everything before the first `(`, then drops exactly
/// `skip_prefix.len()` bytes from the front. The prefix is removed by
/// length, not matched: `skip_prefix` must be the exact common root the
/// profiler emits (trailing separator included). A wrong prefix of the
/// same length silently yields wrong keys, and a prefix longer than the
/// identifier (or one ending inside a multi-byte character) yields `""`.
#[must_use]
pub fn normalize(raw: &str, skip_prefix: &str) -> String {
    let base = match raw.find(DECORATION_MARKER) {
        Some(idx) => &raw[..idx],
        None => raw,
    };
    base.get(skip_prefix.len()..).unwrap_or("").to_string()
}
