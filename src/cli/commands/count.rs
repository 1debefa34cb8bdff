use anyhow::Result;
use clap::Args;
use ignore::WalkBuilder;
use std::path::PathBuf;

use crate::cli::Output;
use crate::config::{InputSettings, WordfreqConfig};
use crate::count::{Aggregator, ExecutionMode, Tally};
use crate::reports::{Report, ReportFormat, ReportOrder};

#[derive(Args)]
pub struct CountArgs {
    /// Files or directories to count
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Row ordering
    #[arg(long, value_enum)]
    pub order: Option<ReportOrder>,

    /// Shorthand for `--order ranked`
    #[arg(short, long, conflicts_with = "order")]
    pub ranked: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Show only the first N rows
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Show statistics after counting
    #[arg(long)]
    pub stats: bool,

    /// Processing mode: auto (smart default), parallel, or sequential
    #[arg(long, value_enum)]
    pub mode: Option<ExecutionMode>,

    /// Follow symbolic links when walking directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Include hidden files when walking directories
    #[arg(long)]
    pub hidden: bool,
}

pub async fn execute(args: CountArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let order = if args.ranked {
        Some(ReportOrder::Ranked)
    } else {
        args.order
    };

    // Unset flags serialize as null and are dropped during loading
    let overrides = serde_json::json!({
        "counter": { "mode": args.mode },
        "report": {
            "order": order,
            "format": args.format,
            "limit": args.limit,
            "stats": args.stats.then_some(true),
        },
        "input": {
            "follow_symlinks": args.follow_symlinks.then_some(true),
            "hidden": args.hidden.then_some(true),
        }
    });
    let config = WordfreqConfig::load(config_path, Some(overrides))?;
    let settings = config.settings()?;

    let files = collect_input_files(&args.paths, &settings.input);
    output.verbose(&format!("Counting words in {} files", files.len()));

    let tally = Aggregator::new(settings.counter.mode)
        .with_min_files_for_parallel(settings.counter.min_files_for_parallel)
        .with_channel_buffer_multiplier(settings.counter.channel_buffer_multiplier)
        .count(&files)?;

    let report = Report::new(settings.report.order, settings.report.format)
        .with_limit(settings.report.limit);
    let show_stats = settings.report.stats;

    match settings.report.format {
        ReportFormat::Json => {
            report.print(&tally.table, show_stats.then_some(&tally.stats))?;
        }
        ReportFormat::Text => {
            report.print(&tally.table, None)?;
            if show_stats {
                print_stats(&tally, output);
            }
        }
    }

    Ok(())
}

/// Expand the path arguments into the list of files to count.
///
/// Directories are walked (gitignore-aware, sorted by path). Anything else is
/// passed through untouched, so a missing file surfaces as a scan diagnostic
/// instead of silently disappearing.
pub fn collect_input_files(paths: &[PathBuf], input: &InputSettings) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let walker = WalkBuilder::new(path)
            .follow_links(input.follow_symlinks)
            .hidden(!input.hidden)
            .sort_by_file_path(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|ft| ft.is_file()) {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => tracing::warn!("Walk error: {}", e),
            }
        }
    }

    files
}

fn print_stats(tally: &Tally, output: &Output) {
    let stats = &tally.stats;

    output.category("Statistics");
    output.summary_stats("Files requested", stats.files_requested);
    output.summary_stats("Files counted", stats.files_scanned);
    output.summary_stats("Files failed", stats.files_failed);
    output.summary_stats("Lines read", stats.lines_read);
    output.summary_stats("Distinct words", stats.distinct_words);
    output.summary_stats("Total words", stats.total_words);
    output.key_value("Duration:", &format!("{}ms", stats.duration_ms), true);

    if !tally.diagnostics.is_empty() {
        output.category("Failed files");
        for diagnostic in &tally.diagnostics {
            output.list_item(&diagnostic.to_string());
        }
    }
}
