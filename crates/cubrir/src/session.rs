//! Per-run capture lifecycle.
//!
//! A session wraps one short-lived run: start capture when the run begins,
//! and on stop fold whatever the profiler saw into the persisted record.
//! Sessions are cheap and single-use by design; a process that handles many
//! runs creates one session per run against the same store.

use crate::codec;
use crate::merge::merge;
use crate::record::{CumulativeRecord, RawSnapshot};
use crate::report::{analyze, CoverageAnalysis, FsSourceLoader};
use crate::result::CubrirResult;
use crate::store::CoverageStore;
use std::path::PathBuf;

/// Line-level execution profiler, as a coverage session sees it.
///
/// Implementations wrap whatever instrumentation the host runtime offers.
/// The session only ever starts capture and collects the resulting
/// snapshot; interpretation of hit markers stays with the profiler.
pub trait Profiler {
    /// Begin capturing executed lines
    fn start_capture(&mut self);

    /// Stop capturing and yield the lines observed since `start_capture`
    fn stop_and_collect(&mut self) -> RawSnapshot;
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Location of the persisted cumulative record
    pub store_path: PathBuf,
    /// Exact common root of every raw identifier the profiler emits,
    /// trailing separator included; removed by length during normalization
    pub skip_prefix: String,
    /// Root for resolving canonical keys back to source files in reports.
    /// Defaults to the process working directory.
    pub source_root: PathBuf,
}

impl SessionConfig {
    /// Create a config for a store location and raw-identifier prefix
    #[must_use]
    pub fn new(store_path: impl Into<PathBuf>, skip_prefix: impl Into<String>) -> Self {
        Self {
            store_path: store_path.into(),
            skip_prefix: skip_prefix.into(),
            source_root: PathBuf::new(),
        }
    }

    /// Set the root for resolving source files in reports
    #[must_use]
    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = root.into();
        self
    }
}

/// Accumulates one run's coverage into the persisted record
#[derive(Debug)]
pub struct CoverageSession<P> {
    config: SessionConfig,
    store: CoverageStore,
    profiler: P,
    capturing: bool,
}

impl<P: Profiler> CoverageSession<P> {
    /// Create a session; the store file is created empty when missing
    pub fn new(config: SessionConfig, profiler: P) -> CubrirResult<Self> {
        let store = CoverageStore::new(&config.store_path);
        store.ensure_exists()?;
        Ok(Self {
            config,
            store,
            profiler,
            capturing: false,
        })
    }

    /// Begin capturing coverage for this run
    pub fn start(&mut self) {
        tracing::debug!("coverage capture started");
        self.profiler.start_capture();
        self.capturing = true;
    }

    /// Stop capturing, fold this run's snapshot into the persisted record,
    /// and return the new cumulative record.
    ///
    /// The store is read with truncate-on-read, merged in memory, and
    /// written back as a full replacement. Two runs overlapping in here
    /// race (last save wins); see [`CoverageStore`].
    pub fn stop(&mut self) -> CubrirResult<CumulativeRecord> {
        let snapshot = self.profiler.stop_and_collect();
        self.capturing = false;

        let prior_text = self.store.load(true)?;
        let content = codec::decode_store(&prior_text);
        if content.is_malformed() {
            tracing::warn!(
                store = %self.store.path().display(),
                "stored coverage is unreadable, starting over from this run"
            );
        }
        let previous = content.into_record();

        let merged = merge(&snapshot, &self.config.skip_prefix, &previous);
        self.store.save(&codec::encode_store(&merged)?)?;
        tracing::debug!(
            files = merged.file_count(),
            lines = merged.line_count(),
            "merged coverage persisted"
        );
        Ok(merged)
    }

    /// Whether a capture is currently active
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Build report statistics for `record` over keys matching `pattern`,
    /// resolving sources under the configured source root.
    pub fn report(
        &self,
        record: &CumulativeRecord,
        pattern: &str,
    ) -> CubrirResult<CoverageAnalysis> {
        let loader = FsSourceLoader::new(&self.config.source_root);
        analyze(record, pattern, &loader)
    }

    /// The underlying store
    #[must_use]
    pub fn store(&self) -> &CoverageStore {
        &self.store
    }

    /// The session configuration
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
