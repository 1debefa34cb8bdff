use super::table::FrequencyTable;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Per-file failure recorded during a count.
///
/// These never abort an aggregation; they travel alongside the tally so the
/// caller can report them.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to open {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to finish reading {} after {} lines: {}", .path.display(), .lines, .source)]
    Read {
        path: PathBuf,
        lines: usize,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ScanError::Open { path, .. } | ScanError::Read { path, .. } => path,
        }
    }
}

/// What a single file scan produced
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub table: FrequencyTable,
    pub lines_read: usize,
    pub error: Option<ScanError>,
}

/// Statistics from a counting run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CountStats {
    pub files_requested: usize,
    pub files_scanned: usize,
    pub files_failed: usize,
    pub lines_read: usize,
    pub distinct_words: usize,
    pub total_words: usize,
    pub duration_ms: u64,
}

/// Result of a counting run
#[derive(Debug, Default)]
pub struct Tally {
    pub table: FrequencyTable,
    pub stats: CountStats,
    pub diagnostics: Vec<ScanError>,
}
