use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;
use tracing::debug;

use crate::error::Result;

/// Write one table as tab-delimited text with a header row. Nulls are written
/// as empty fields.
pub fn write_tsv(batch: &RecordBatch, path: &Path) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    let mut writer = WriterBuilder::new()
        .with_header(true)
        .with_delimiter(b'\t')
        .build(file);
    writer.write(batch)?;
    debug!("Wrote {} rows to {}", batch.num_rows(), path.display());
    Ok(())
}
