use super::scanner;
use super::table::{FrequencyTable, Pair};
use super::types::{ScanError, ScanOutcome, Tally};
use anyhow::Result;
use crossbeam::channel::{Receiver, Sender, bounded};
use crossbeam::select;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// How files are distributed during a count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Scan files one after another on the calling thread
    Sequential,
    /// One worker thread per file, fanned into a single coordinator
    Parallel,
}

/// Configured execution mode, resolved into a strategy per run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Parallel once the file count reaches the configured threshold
    #[default]
    Auto,
    /// Always one worker per file
    Parallel,
    /// Always scan on the calling thread
    Sequential,
}

impl ExecutionStrategy {
    /// Threshold-based selection between sequential and parallel execution
    ///
    /// ```rust
    /// use wordfreq::count::ExecutionStrategy;
    ///
    /// assert_eq!(ExecutionStrategy::auto(1, 2), ExecutionStrategy::Sequential);
    /// assert_eq!(ExecutionStrategy::auto(8, 2), ExecutionStrategy::Parallel);
    /// ```
    pub fn auto(file_count: usize, min_files_for_parallel: usize) -> Self {
        if file_count >= min_files_for_parallel {
            ExecutionStrategy::Parallel
        } else {
            ExecutionStrategy::Sequential
        }
    }

    pub fn from_mode(mode: ExecutionMode, file_count: usize, min_files_for_parallel: usize) -> Self {
        match mode {
            ExecutionMode::Auto => Self::auto(file_count, min_files_for_parallel),
            ExecutionMode::Parallel => ExecutionStrategy::Parallel,
            ExecutionMode::Sequential => ExecutionStrategy::Sequential,
        }
    }
}

/// Completion signal sent by a worker once all of its pairs are queued
struct WorkerDone {
    worker_id: usize,
    lines_read: usize,
    error: Option<ScanError>,
}

/// Upper bound on buffered pairs, whatever the configured multiplier
pub const MAX_PAIR_CHANNEL_CAPACITY: usize = 1 << 16;

/// Per-file scan run by each worker
type ScanFn = fn(&Path) -> ScanOutcome;

/// Everything a worker thread needs, moved in at spawn time
struct WorkerContext<'a> {
    worker_id: usize,
    path: &'a Path,
    scan: ScanFn,
    pair_tx: Sender<Pair>,
    done_tx: Sender<WorkerDone>,
}

/// Counts words across a set of files and merges them into one table
#[derive(Debug, Clone)]
pub struct Aggregator {
    mode: ExecutionMode,
    min_files_for_parallel: usize,
    channel_buffer_multiplier: usize,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Auto,
            min_files_for_parallel: 2,
            channel_buffer_multiplier: 1,
        }
    }
}

impl Aggregator {
    pub fn new(mode: ExecutionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_min_files_for_parallel(mut self, min_files: usize) -> Self {
        self.min_files_for_parallel = min_files;
        self
    }

    /// Results channel capacity is `files * multiplier`, see
    /// [`Aggregator::pair_channel_capacity`]
    pub fn with_channel_buffer_multiplier(mut self, multiplier: usize) -> Self {
        self.channel_buffer_multiplier = multiplier.max(1);
        self
    }

    /// Slots in the results channel for a run over `file_count` files,
    /// between 1 and [`MAX_PAIR_CHANNEL_CAPACITY`]
    pub fn pair_channel_capacity(&self, file_count: usize) -> usize {
        file_count
            .saturating_mul(self.channel_buffer_multiplier)
            .clamp(1, MAX_PAIR_CHANNEL_CAPACITY)
    }

    /// Count every file in `files`.
    ///
    /// Unreadable files are recorded in `Tally::diagnostics` and never fail
    /// the run. The only error is a worker thread panicking.
    pub fn count(&self, files: &[PathBuf]) -> Result<Tally> {
        let start_time = Instant::now();
        let strategy =
            ExecutionStrategy::from_mode(self.mode, files.len(), self.min_files_for_parallel);
        tracing::debug!("Counting {} files using {:?} strategy", files.len(), strategy);

        let mut tally = match strategy {
            ExecutionStrategy::Sequential => Self::count_sequential(files),
            ExecutionStrategy::Parallel => self.count_parallel(files)?,
        };

        tally.stats.files_requested = files.len();
        tally.stats.distinct_words = tally.table.len();
        tally.stats.total_words = tally.table.total();
        tally.stats.duration_ms = start_time.elapsed().as_millis() as u64;
        Ok(tally)
    }

    fn count_sequential(files: &[PathBuf]) -> Tally {
        let mut tally = Tally::default();
        for path in files {
            let ScanOutcome {
                table,
                lines_read,
                error,
            } = scanner::scan_file(path);
            tally.table.merge(table);
            record(&mut tally, lines_read, error);
        }
        tally
    }

    fn count_parallel(&self, files: &[PathBuf]) -> Result<Tally> {
        self.fan_in(files, scanner::scan_file)
    }

    fn fan_in(&self, files: &[PathBuf], scan: ScanFn) -> Result<Tally> {
        if files.is_empty() {
            return Ok(Tally::default());
        }

        let (pair_tx, pair_rx): (Sender<Pair>, Receiver<Pair>) =
            bounded(self.pair_channel_capacity(files.len()));
        // One slot per worker, so completion signals never block
        let (done_tx, done_rx): (Sender<WorkerDone>, Receiver<WorkerDone>) =
            bounded(files.len());

        crossbeam::thread::scope(|s| -> Result<Tally> {
            for (worker_id, path) in files.iter().enumerate() {
                let ctx = WorkerContext {
                    worker_id,
                    path,
                    scan,
                    pair_tx: pair_tx.clone(),
                    done_tx: done_tx.clone(),
                };
                s.builder()
                    .name(format!("wordfreq-worker-{worker_id}"))
                    .spawn(move |_| worker_thread(ctx))?;
            }

            // Only workers hold senders from here on
            drop(pair_tx);
            drop(done_tx);

            Ok(coordinate(pair_rx, done_rx, files.len()))
        })
        .map_err(|_| anyhow::anyhow!("Worker thread panicked while counting words"))?
    }
}

/// Scan one file, queue every pair, then signal completion.
///
/// The signal goes out only after the last pair is queued, so the
/// coordinator can't retire a worker whose pairs are still unsent.
fn worker_thread(ctx: WorkerContext<'_>) {
    let ScanOutcome {
        table,
        lines_read,
        error,
    } = (ctx.scan)(ctx.path);
    tracing::trace!(
        "worker-{} finished {} ({} distinct words)",
        ctx.worker_id,
        ctx.path.display(),
        table.len()
    );

    for pair in table.into_pairs() {
        if ctx.pair_tx.send(pair).is_err() {
            break; // Coordinator dropped
        }
    }
    drop(ctx.pair_tx);

    let _ = ctx.done_tx.send(WorkerDone {
        worker_id: ctx.worker_id,
        lines_read,
        error,
    });
}

/// Single writer for the global table: merge pairs as they arrive until
/// every worker has reported done, then drain what is still buffered.
fn coordinate(pair_rx: Receiver<Pair>, done_rx: Receiver<WorkerDone>, workers: usize) -> Tally {
    let mut tally = Tally::default();
    let mut working = workers;

    while working > 0 {
        select! {
            recv(pair_rx) -> msg => {
                if let Ok(pair) = msg {
                    tally.table.add(pair);
                }
            }
            recv(done_rx) -> msg => match msg {
                Ok(done) => {
                    working -= 1;
                    tracing::trace!("worker-{} done, {} outstanding", done.worker_id, working);
                    record(&mut tally, done.lines_read, done.error);
                }
                // Every sender is gone without a signal: a worker panicked
                Err(_) => break,
            },
        }
    }

    // Completion signals can be picked ahead of pairs still in the buffer
    while let Ok(pair) = pair_rx.try_recv() {
        tally.table.add(pair);
    }

    tally
}

fn record(tally: &mut Tally, lines_read: usize, error: Option<ScanError>) {
    let stats = &mut tally.stats;
    stats.lines_read += lines_read;
    match error {
        Some(error) => {
            stats.files_failed += 1;
            tally.diagnostics.push(error);
        }
        None => stats.files_scanned += 1,
    }
}

/// Count `files` with the default aggregator
pub fn count_files(files: &[PathBuf]) -> Result<Tally> {
    Aggregator::default().count(files)
}

/// Merge a set of already-scanned tables, used where files are not involved
pub fn merge_all<I: IntoIterator<Item = FrequencyTable>>(tables: I) -> FrequencyTable {
    let mut merged = FrequencyTable::new();
    for table in tables {
        merged.merge(table);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_files(dir: &TempDir, files: &[(&str, &str)]) -> Vec<PathBuf> {
        files
            .iter()
            .map(|(name, content)| {
                let path = dir.path().join(name);
                fs::write(&path, content).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_auto_strategy() {
        assert_eq!(ExecutionStrategy::auto(0, 2), ExecutionStrategy::Sequential);
        assert_eq!(ExecutionStrategy::auto(1, 2), ExecutionStrategy::Sequential);
        assert_eq!(ExecutionStrategy::auto(2, 2), ExecutionStrategy::Parallel);
    }

    #[test]
    fn test_explicit_modes_ignore_threshold() {
        assert_eq!(
            ExecutionStrategy::from_mode(ExecutionMode::Parallel, 1, 100),
            ExecutionStrategy::Parallel
        );
        assert_eq!(
            ExecutionStrategy::from_mode(ExecutionMode::Sequential, 100, 2),
            ExecutionStrategy::Sequential
        );
    }

    #[test]
    fn test_parallel_count_sums_files() {
        let temp_dir = TempDir::new().unwrap();
        let files = write_files(
            &temp_dir,
            &[
                ("one.txt", "apple banana apple"),
                ("two.txt", "banana cherry"),
                ("three.txt", "Apple"),
            ],
        );

        let tally = Aggregator::new(ExecutionMode::Parallel).count(&files).unwrap();

        assert_eq!(tally.table.get("apple"), Some(3));
        assert_eq!(tally.table.get("banana"), Some(2));
        assert_eq!(tally.table.get("cherry"), Some(1));
        assert_eq!(tally.stats.files_requested, 3);
        assert_eq!(tally.stats.files_scanned, 3);
        assert_eq!(tally.stats.files_failed, 0);
        assert_eq!(tally.stats.total_words, 6);
        assert_eq!(tally.stats.distinct_words, 3);
        assert!(tally.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_file_list() {
        for mode in [ExecutionMode::Parallel, ExecutionMode::Sequential] {
            let tally = Aggregator::new(mode).count(&[]).unwrap();
            assert!(tally.table.is_empty());
            assert_eq!(tally.stats.files_requested, 0);
            assert!(tally.diagnostics.is_empty());
        }
    }

    #[test]
    fn test_missing_file_degrades_gracefully() {
        let temp_dir = TempDir::new().unwrap();
        let mut files = write_files(&temp_dir, &[("valid.txt", "hello world hello")]);
        files.push(temp_dir.path().join("missing.txt"));

        let tally = Aggregator::new(ExecutionMode::Parallel).count(&files).unwrap();

        let expected = scanner::scan_file(&files[0]).table;
        assert_eq!(tally.table, expected);
        assert_eq!(tally.stats.files_scanned, 1);
        assert_eq!(tally.stats.files_failed, 1);
        assert_eq!(tally.diagnostics.len(), 1);
        assert_eq!(tally.diagnostics[0].path(), &files[1]);
        assert!(matches!(tally.diagnostics[0], ScanError::Open { .. }));
    }

    /// Spreadsheet-style column name, keeps generated words digit-free
    fn to_letters(mut n: usize) -> String {
        let mut s = String::new();
        loop {
            s.push((b'a' + (n % 26) as u8) as char);
            n /= 26;
            if n == 0 {
                break;
            }
        }
        s
    }

    #[test]
    fn test_small_channel_buffer_does_not_lose_pairs() {
        let temp_dir = TempDir::new().unwrap();
        let distinct: String = (0..500).map(|i| format!("w{} ", to_letters(i))).collect();
        let repeated = "word ".repeat(500);
        let files = write_files(
            &temp_dir,
            &[
                ("a.txt", distinct.as_str()),
                ("b.txt", distinct.as_str()),
                ("c.txt", repeated.as_str()),
            ],
        );

        let tally = Aggregator::new(ExecutionMode::Parallel)
            .with_channel_buffer_multiplier(1)
            .count(&files)
            .unwrap();
        let sequential = Aggregator::new(ExecutionMode::Sequential).count(&files).unwrap();

        assert_eq!(tally.table, sequential.table);
        assert_eq!(tally.table.len(), 501);
        assert_eq!(tally.table.get("word"), Some(500));
        assert_eq!(tally.table.get("wa"), Some(2));
    }

    #[test]
    fn test_pair_channel_capacity_is_bounded() {
        let default = Aggregator::default();
        assert_eq!(default.pair_channel_capacity(3), 3);

        let doubled = Aggregator::default().with_channel_buffer_multiplier(2);
        assert_eq!(doubled.pair_channel_capacity(3), 6);

        let huge = Aggregator::default().with_channel_buffer_multiplier(usize::MAX);
        assert_eq!(huge.pair_channel_capacity(3), MAX_PAIR_CHANNEL_CAPACITY);
        assert_eq!(huge.pair_channel_capacity(usize::MAX), MAX_PAIR_CHANNEL_CAPACITY);
    }

    #[test]
    fn test_huge_multiplier_still_counts() {
        let temp_dir = TempDir::new().unwrap();
        let files = write_files(&temp_dir, &[("a.txt", "red blue"), ("b.txt", "blue")]);

        let tally = Aggregator::new(ExecutionMode::Parallel)
            .with_channel_buffer_multiplier(usize::MAX)
            .count(&files)
            .unwrap();

        assert_eq!(tally.table.get("blue"), Some(2));
        assert_eq!(tally.table.get("red"), Some(1));
    }

    fn scan_or_panic(path: &Path) -> ScanOutcome {
        if path.ends_with("poison.txt") {
            panic!("scanner blew up on {}", path.display());
        }
        scanner::scan_file(path)
    }

    #[test]
    fn test_worker_panic_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let files = write_files(
            &temp_dir,
            &[("good.txt", "fine words"), ("poison.txt", "never read")],
        );

        let result = Aggregator::new(ExecutionMode::Parallel).fan_in(&files, scan_or_panic);

        let error = result.unwrap_err();
        assert!(error.to_string().contains("panicked"));
    }

    #[test]
    fn test_coordinator_stops_when_workers_vanish() {
        let (pair_tx, pair_rx) = bounded(4);
        let (done_tx, done_rx) = bounded::<WorkerDone>(2);
        pair_tx.send(Pair::new("left", 1)).unwrap();
        drop(pair_tx);
        drop(done_tx);

        // Two workers expected, neither signals
        let tally = coordinate(pair_rx, done_rx, 2);

        assert_eq!(tally.table.get("left"), Some(1));
        assert_eq!(tally.stats.files_scanned, 0);
    }

    #[test]
    fn test_merge_all() {
        let mut a = FrequencyTable::new();
        a.increment("ab");
        let mut b = FrequencyTable::new();
        b.increment("ab");
        b.increment("cd");

        let merged = merge_all([a, b]);
        assert_eq!(merged.get("ab"), Some(2));
        assert_eq!(merged.get("cd"), Some(1));
    }
}
