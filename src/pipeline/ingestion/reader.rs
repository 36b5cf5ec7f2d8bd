use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, instrument, warn};

use crate::config::ErrorHandlingStrategy;
use crate::constants::{COLUMN_COUNT, IGNORED_FILE_PREFIXES};
use crate::error::{EtlError, Result};
use crate::metrics::StageMetrics;
use crate::types::EventRecord;

/// Everything read from the input directory, before deduplication.
#[derive(Debug, Default)]
pub struct IngestOutcome {
    /// Rows of every successfully read file, in file then line order
    pub records: Vec<EventRecord>,
    pub files_read: usize,
    pub files_skipped: usize,
    pub errors: Vec<String>,
}

/// List the files to ingest: regular files, sorted by name, skipping hidden
/// and underscore-prefixed entries.
pub fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if IGNORED_FILE_PREFIXES.iter().any(|p| name.starts_with(p)) {
            continue;
        }
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Parse headerless, unquoted, tab-separated event rows.
///
/// Any row that does not carry exactly [`COLUMN_COUNT`] fields, or whose
/// typed fields fail to parse, fails the whole input.
pub fn read_events<R: Read>(reader: R, source: &Path) -> Result<Vec<EventRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        if row.len() != COLUMN_COUNT {
            return Err(EtlError::Schema {
                path: source.to_path_buf(),
                line,
                message: format!("expected {} fields, found {}", COLUMN_COUNT, row.len()),
            });
        }
        let record: EventRecord = row.deserialize(None).map_err(|e| EtlError::Schema {
            path: source.to_path_buf(),
            line,
            message: e.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

pub fn read_event_file(path: &Path) -> Result<Vec<EventRecord>> {
    let file = File::open(path)?;
    read_events(BufReader::new(file), path)
}

/// Read every eligible file under `dir` into one table.
///
/// With [`ErrorHandlingStrategy::SkipFailedFiles`] a failing file is logged and
/// dropped whole, and an unreadable directory yields an empty outcome.
/// With [`ErrorHandlingStrategy::StopOnFirstError`] the first failure is returned.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn ingest_directory(dir: &Path, strategy: ErrorHandlingStrategy) -> Result<IngestOutcome> {
    let mut outcome = IngestOutcome::default();

    let files = match list_input_files(dir) {
        Ok(files) => files,
        Err(e) if strategy == ErrorHandlingStrategy::SkipFailedFiles => {
            error!("Error reading data directory {}: {}", dir.display(), e);
            outcome
                .errors
                .push(format!("{}: {}", dir.display(), e));
            return Ok(outcome);
        }
        Err(e) => return Err(e),
    };
    info!("📂 Found {} input files", files.len());

    for path in files {
        match read_event_file(&path) {
            Ok(mut records) => {
                debug!("Read {} rows from {}", records.len(), path.display());
                StageMetrics::record_file_read(records.len());
                outcome.files_read += 1;
                outcome.records.append(&mut records);
            }
            Err(e) => match strategy {
                ErrorHandlingStrategy::SkipFailedFiles => {
                    warn!("Skipping {}: {}", path.display(), e);
                    StageMetrics::record_file_skipped();
                    outcome.files_skipped += 1;
                    outcome.errors.push(format!("{}: {}", path.display(), e));
                }
                ErrorHandlingStrategy::StopOnFirstError => {
                    error!("Aborting ingestion at {}: {}", path.display(), e);
                    return Err(e);
                }
            },
        }
    }

    info!(
        "✅ Ingested {} rows from {} files ({} skipped)",
        outcome.records.len(),
        outcome.files_read,
        outcome.files_skipped
    );
    Ok(outcome)
}
