//! # wordfreq - concurrent word-frequency counter
//!
//! wordfreq counts how often every word occurs across a set of text files.
//! Each file is scanned by its own worker thread into a private table; the
//! workers stream their counts over channels to a single coordinator that
//! merges them into one global table. The result can be printed
//! alphabetically or ranked by frequency.
//!
//! ## Quick Start
//!
//! ```bash
//! # Alphabetical report
//! wordfreq count notes.txt book.txt
//!
//! # Ten most frequent words in a directory tree
//! wordfreq count --ranked -n 10 docs/
//!
//! # Machine-readable output with run statistics
//! wordfreq count --format json --stats docs/
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use wordfreq::count::count_files;
//! use wordfreq::reports::{Report, ReportFormat, ReportOrder};
//! use std::path::PathBuf;
//!
//! let tally = count_files(&[PathBuf::from("book.txt")])?;
//! for failure in &tally.diagnostics {
//!     eprintln!("{failure}");
//! }
//! Report::new(ReportOrder::Ranked, ReportFormat::Text).print(&tally.table, None)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Words
//!
//! A word is a maximal run of alphabetic characters, lower-cased. Tokens of a
//! single character are not counted.

pub mod cli;
pub mod config;
pub mod count;
pub mod reports;

pub use cli::{Cli, Output};
pub use config::WordfreqConfig;

/// Result type alias for wordfreq operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
