//! Report rendering
//!
//! Reports are read-only projections of a [`FrequencyTable`]: rows are
//! ordered, optionally truncated, and written either as aligned text columns
//! or as JSON.

pub mod json;
pub mod text;

use crate::count::{CountStats, FrequencyTable, Pair};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Row ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportOrder {
    /// Words in code point order
    #[default]
    Alphabetical,
    /// Most frequent first, ties in word order
    Ranked,
}

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Aligned `Word Frequency` columns
    #[default]
    Text,
    /// JSON document
    Json,
}

/// A configured report over a finished table
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub order: ReportOrder,
    pub format: ReportFormat,
    /// Only the first `limit` rows (0 = all)
    pub limit: usize,
}

impl Report {
    pub fn new(order: ReportOrder, format: ReportFormat) -> Self {
        Self {
            order,
            format,
            limit: 0,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Ordered, truncated rows
    pub fn rows(&self, table: &FrequencyTable) -> Vec<Pair> {
        let mut pairs = match self.order {
            ReportOrder::Alphabetical => table.alphabetical(),
            ReportOrder::Ranked => table.ranked(),
        };
        if self.limit > 0 {
            pairs.truncate(self.limit);
        }
        pairs
    }

    /// Render to `out`. Stats are only embedded by the JSON format.
    pub fn write<W: Write>(
        &self,
        table: &FrequencyTable,
        stats: Option<&CountStats>,
        out: &mut W,
    ) -> Result<()> {
        let rows = self.rows(table);
        match self.format {
            ReportFormat::Text => text::write_columns(out, &rows)?,
            ReportFormat::Json => json::write_json(out, self.order, &rows, stats)?,
        }
        out.flush()?;
        Ok(())
    }

    /// Render to standard output
    pub fn print(&self, table: &FrequencyTable, stats: Option<&CountStats>) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = std::io::BufWriter::new(stdout.lock());
        self.write(table, stats, &mut out)
    }
}
