//! Portable coverage record codec.
//!
//! The persisted shape is a JSON array of per-file objects, files in key
//! order and lines ascending:
//!
//! ```text
//! [{"file":"src/App.py","lines":[10,11,15]},{"file":"src/Util.py","lines":[2]}]
//! ```
//!
//! Encoding the same [`CumulativeRecord`] always yields the same bytes, so
//! store writes are diffable and repeat runs without new coverage leave the
//! file untouched byte-for-byte.

use crate::record::CumulativeRecord;
use crate::result::CubrirResult;
use serde::{Deserialize, Serialize};

/// One file's entry in the portable shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLines {
    /// Canonical file key
    pub file: String,
    /// Line numbers observed executed, ascending
    pub lines: Vec<u32>,
}

/// Portable, order-preserving shape of a cumulative record
pub type PortableRecord = Vec<FileLines>;

/// Content decoded from persisted store text.
///
/// The store is written by short-lived processes that can die mid-write, so
/// unreadable content is a state to report, not an error to raise. Callers
/// that only need the data use [`StoreContent::into_record`]; callers that
/// want to log the degradation check [`StoreContent::is_malformed`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreContent {
    /// The store held no text
    Empty,
    /// The store text did not parse as a portable record
    Malformed,
    /// A well-formed prior record
    Record(CumulativeRecord),
}

impl StoreContent {
    /// The prior record, with `Empty` and `Malformed` degrading to an
    /// empty record
    #[must_use]
    pub fn into_record(self) -> CumulativeRecord {
        match self {
            Self::Empty | Self::Malformed => CumulativeRecord::new(),
            Self::Record(record) => record,
        }
    }

    /// Whether the store text was present but unreadable
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed)
    }
}

/// Convert a cumulative record into the portable shape.
#[must_use]
pub fn encode(record: &CumulativeRecord) -> PortableRecord {
    record
        .iter()
        .map(|(file, lines)| FileLines {
            file: file.clone(),
            lines: lines.iter().copied().collect(),
        })
        .collect()
}

/// Rebuild a cumulative record from the portable shape.
///
/// Repeated file entries union their lines; duplicate line numbers collapse.
#[must_use]
pub fn decode(portable: &[FileLines]) -> CumulativeRecord {
    let mut record = CumulativeRecord::new();
    for entry in portable {
        record.mark_all(&entry.file, entry.lines.iter().copied());
    }
    record
}

/// Serialize a cumulative record to store text.
pub fn encode_store(record: &CumulativeRecord) -> CubrirResult<String> {
    Ok(serde_json::to_string(&encode(record))?)
}

/// Decode persisted store text without failing.
///
/// Zero-length (or all-whitespace) text is [`StoreContent::Empty`]; text
/// that does not parse as a portable record is [`StoreContent::Malformed`].
/// Neither raises an error.
#[must_use]
pub fn decode_store(text: &str) -> StoreContent {
    if text.trim().is_empty() {
        return StoreContent::Empty;
    }
    match serde_json::from_str::<PortableRecord>(text) {
        Ok(portable) => StoreContent::Record(decode(&portable)),
        Err(_) => StoreContent::Malformed,
    }
}
