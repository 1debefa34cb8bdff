use super::ReportOrder;
use crate::count::{CountStats, Pair};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct JsonReport<'a> {
    order: ReportOrder,
    words: &'a [Pair],
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a CountStats>,
}

/// Write the rows as a single pretty-printed JSON document
pub fn write_json<W: Write>(
    out: &mut W,
    order: ReportOrder,
    pairs: &[Pair],
    stats: Option<&CountStats>,
) -> anyhow::Result<()> {
    let report = JsonReport {
        order,
        words: pairs,
        stats,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
