//! Cubrir: Cumulative Line Coverage Across Short-Lived Runs
//!
//! Cubrir (Spanish: "to cover") accumulates per-line execution coverage
//! emitted by a line-level profiler, one short-lived run at a time. Each
//! run's snapshot is folded into a single durable record, so coverage grows
//! across requests, test invocations, and restarts; usage reports are
//! rendered from that record on demand.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      CUBRIR Architecture                         │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌──────────┐   ┌───────────┐   ┌───────┐   ┌───────────────┐   │
//! │   │ Profiler │──►│ Normalize │──►│ Merge │──►│ Coverage      │   │
//! │   │ snapshot │   │ raw keys  │   │ union │   │ Store (JSON)  │   │
//! │   └──────────┘   └───────────┘   └───┬───┘   └──────┬────────┘   │
//! │                                      ▲ prior record │            │
//! │                                      └──────────────┘            │
//! │   ┌─────────────────┐   ┌───────────────┐                        │
//! │   │ Report analysis │──►│ HTML page     │  (read-only view)      │
//! │   └─────────────────┘   └───────────────┘                        │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! Wrap a run in a [`CoverageSession`]; `stop` folds the run's snapshot
//! into the persisted record and returns the new cumulative state:
//!
//! ```no_run
//! use cubrir::{CoverageSession, CubrirResult, Profiler, RawSnapshot, SessionConfig};
//!
//! struct HostProfiler;
//!
//! impl Profiler for HostProfiler {
//!     fn start_capture(&mut self) {
//!         // enable the runtime's line instrumentation
//!     }
//!     fn stop_and_collect(&mut self) -> RawSnapshot {
//!         RawSnapshot::new() // gather what the runtime recorded
//!     }
//! }
//!
//! fn main() -> CubrirResult<()> {
//!     let config = SessionConfig::new("/var/lib/app/coverage.json", "/srv/app/")
//!         .with_source_root("/srv/app");
//!     let mut session = CoverageSession::new(config, HostProfiler)?;
//!
//!     session.start();
//!     // ... the run executes ...
//!     let record = session.stop()?;
//!
//!     println!("{} files, {} lines covered", record.file_count(), record.line_count());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod codec;
mod html;
mod merge;
mod normalize;
mod record;
mod report;
mod result;
mod session;
mod store;

pub use codec::{decode, decode_store, encode, encode_store, FileLines, PortableRecord, StoreContent};
pub use html::HtmlFormatter;
pub use merge::merge;
pub use normalize::normalize;
pub use record::{CumulativeRecord, LineHits, LineSet, RawSnapshot};
pub use report::{analyze, CoverageAnalysis, FileReport, FsSourceLoader, SourceLoader};
pub use result::{CubrirError, CubrirResult};
pub use session::{CoverageSession, Profiler, SessionConfig};
pub use store::CoverageStore;
