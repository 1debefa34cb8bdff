//! Configuration management for wordfreq
//!
//! Settings are layered with figment (embedded defaults, user and repository
//! files, environment, CLI flags) and then extracted into the typed sections
//! below.

pub mod core;
pub mod formats;

pub use self::core::WordfreqConfig;
pub use formats::ConfigFormat;

use crate::count::ExecutionMode;
use crate::reports::{ReportFormat, ReportOrder};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How files are counted
    pub counter: CounterSettings,

    /// How results are rendered
    pub report: ReportSettings,

    /// How directory arguments are expanded
    pub input: InputSettings,
}

/// Counting engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterSettings {
    /// auto, parallel or sequential
    pub mode: ExecutionMode,

    /// Minimum number of files before `auto` goes parallel
    pub min_files_for_parallel: usize,

    /// Results channel slots per input file
    pub channel_buffer_multiplier: usize,
}

impl Default for CounterSettings {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Auto,
            min_files_for_parallel: 2,
            channel_buffer_multiplier: 1,
        }
    }
}

/// Report configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub order: ReportOrder,
    pub format: ReportFormat,

    /// Show only the first N rows (0 = all)
    pub limit: usize,

    /// Print run statistics after the report
    pub stats: bool,
}

/// Directory walking configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    pub follow_symlinks: bool,

    /// Include hidden files and directories
    pub hidden: bool,
}
