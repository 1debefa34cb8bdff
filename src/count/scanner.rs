use super::table::FrequencyTable;
use super::tokenizer;
use super::types::{ScanError, ScanOutcome};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Widest UTF-8 encoding of a single character, in bytes
pub const MAX_CHAR_WIDTH: usize = 4;

/// Whether a token is counted.
///
/// A token qualifies when it is wider than one encoded character or holds
/// more than one character. In practice this drops single-letter words.
pub fn qualifies(token: &str) -> bool {
    token.len() > MAX_CHAR_WIDTH || token.chars().nth(1).is_some()
}

/// Count the qualifying words of a single line into `table`
pub fn count_line(line: &str, table: &mut FrequencyTable) {
    for token in tokenizer::words(line.trim()) {
        if qualifies(token) {
            table.increment(&normalize(token));
        }
    }
}

/// Lower-case one character at a time. Unlike `str::to_lowercase` there is
/// no context rule, so a word-final `Σ` becomes `σ` rather than `ς`.
pub fn normalize(token: &str) -> String {
    token.chars().flat_map(char::to_lowercase).collect()
}

/// Scan one file into a fresh table.
///
/// Open and read failures are logged and returned in the outcome rather than
/// as an `Err`: a file that can't be opened contributes nothing, a file that
/// fails mid-read keeps the counts gathered before the failure.
pub fn scan_file(path: &Path) -> ScanOutcome {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(source) => {
            let error = ScanError::Open {
                path: path.to_path_buf(),
                source,
            };
            tracing::warn!("{}", error);
            return ScanOutcome {
                error: Some(error),
                ..ScanOutcome::default()
            };
        }
    };

    scan_reader(BufReader::new(file), path)
}

/// Scan an already-open line source. `path` is only used for diagnostics.
pub fn scan_reader<R: BufRead>(mut reader: R, path: &Path) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf);

        // Whatever arrived before an error still counts
        if !buf.is_empty() {
            outcome.lines_read += 1;
            count_line(&String::from_utf8_lossy(&buf), &mut outcome.table);
        }

        match read {
            Ok(0) => break,
            Ok(_) => {}
            Err(source) => {
                let error = ScanError::Read {
                    path: path.to_path_buf(),
                    lines: outcome.lines_read,
                    source,
                };
                tracing::warn!("{}", error);
                outcome.error = Some(error);
                break;
            }
        }
    }

    tracing::trace!(
        "Scanned {}: {} lines, {} distinct words",
        path.display(),
        outcome.lines_read,
        outcome.table.len()
    );
    outcome
}
