use crate::count::{FrequencyTable, Pair};
use std::io::{self, Write};

const WORD_HEADER: &str = "Word";
const FREQUENCY_HEADER: &str = "Frequency";

/// Column widths for a set of rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    /// Widest word, in characters
    pub word: usize,
    /// Widest count, in digits
    pub count: usize,
}

impl ColumnWidths {
    pub fn measure(pairs: &[Pair]) -> Self {
        pairs.iter().fold(Self { word: 0, count: 0 }, |widths, pair| Self {
            word: widths.word.max(pair.word.chars().count()),
            count: widths.count.max(digits(pair.count)),
        })
    }

    /// Spaces between the two header labels.
    ///
    /// One separating space plus a field as wide as the distance between the
    /// columns and the labels, never narrower than one. Columns wider than the
    /// labels put `Frequency` flush with the count column; narrower ones pad
    /// the header by the shortfall instead.
    pub fn header_gap(&self) -> usize {
        let labels = WORD_HEADER.len() + FREQUENCY_HEADER.len();
        1 + (self.word + self.count).abs_diff(labels).max(1)
    }
}

fn digits(mut n: usize) -> usize {
    let mut width = 1;
    while n >= 10 {
        n /= 10;
        width += 1;
    }
    width
}

/// Write a header plus one aligned `word count` row per pair
pub fn write_columns<W: Write>(out: &mut W, pairs: &[Pair]) -> io::Result<()> {
    let widths = ColumnWidths::measure(pairs);

    writeln!(
        out,
        "{WORD_HEADER}{:gap$}{FREQUENCY_HEADER}",
        "",
        gap = widths.header_gap()
    )?;
    for pair in pairs {
        writeln!(
            out,
            "{:<word_width$} {:>count_width$}",
            pair.word,
            pair.count,
            word_width = widths.word,
            count_width = widths.count
        )?;
    }
    Ok(())
}

/// Words in code point order
pub fn render_alphabetical<W: Write>(table: &FrequencyTable, out: &mut W) -> io::Result<()> {
    write_columns(out, &table.alphabetical())
}

/// Words by descending count
pub fn render_ranked<W: Write>(table: &FrequencyTable, out: &mut W) -> io::Result<()> {
    write_columns(out, &table.ranked())
}
