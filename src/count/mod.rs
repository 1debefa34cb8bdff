//! Word counting engine
//!
//! Files are scanned by independent workers, each owning a private
//! [`FrequencyTable`]. Workers stream their `(word, count)` pairs over a
//! channel to a single coordinator, which is the only writer of the global
//! table:
//!
//! ```text
//! ┌──────────┐  pairs   ┌──────────────┐
//! │ worker 0 │─────────▶│              │
//! ├──────────┤          │ coordinator  │──▶ Tally { table, stats, diagnostics }
//! │ worker 1 │─────────▶│ (one writer) │
//! ├──────────┤  done    │              │
//! │ worker N │─────────▶│              │
//! └──────────┘          └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use wordfreq::count::{Aggregator, ExecutionMode};
//! use std::path::PathBuf;
//!
//! let files = vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")];
//! let tally = Aggregator::new(ExecutionMode::Parallel).count(&files)?;
//!
//! for pair in tally.table.ranked().iter().take(10) {
//!     println!("{} {}", pair.word, pair.count);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod aggregator;
pub mod scanner;
pub mod table;
pub mod tokenizer;
pub mod types;


pub use aggregator::{Aggregator, ExecutionMode, ExecutionStrategy, count_files, merge_all};
pub use scanner::{qualifies, scan_file};
pub use table::{FrequencyTable, Pair};
pub use tokenizer::{Words, words};
pub use types::{CountStats, ScanError, ScanOutcome, Tally};
