use std::fs::File;
use std::path::Path;

use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;
use tracing::debug;

use crate::config::ParquetCompression;
use crate::error::Result;

fn writer_properties(compression: ParquetCompression) -> Result<WriterProperties> {
    let compression = match compression {
        ParquetCompression::Snappy => Compression::SNAPPY,
        ParquetCompression::Zstd => Compression::ZSTD(ZstdLevel::try_new(3)?),
        ParquetCompression::None => Compression::UNCOMPRESSED,
    };
    Ok(WriterProperties::builder()
        .set_compression(compression)
        .set_dictionary_enabled(true)
        .build())
}

/// Write one table as a single Parquet file, replacing any existing file.
pub fn write_parquet(batch: &RecordBatch, path: &Path, compression: ParquetCompression) -> Result<()> {
    let file = File::create(path)?;
    let props = writer_properties(compression)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;
    debug!("Wrote {} rows to {}", batch.num_rows(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::table::TableRows;
    use crate::types::fixtures::event;
    use crate::types::EventRecord;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use tempfile::tempdir;

    #[test]
    fn test_parquet_file_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kg_raw.parquet");
        let rows = vec![
            event(1, "20230101", "20230101000000", "u1"),
            event(2, "20230102", "20230102000000", "u2"),
        ];
        let batch = EventRecord::record_batch(&rows).unwrap();

        for compression in [ParquetCompression::Snappy, ParquetCompression::Zstd, ParquetCompression::None] {
            write_parquet(&batch, &path, compression).unwrap();

            let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap())
                .unwrap()
                .build()
                .unwrap();
            let batches: Vec<RecordBatch> = reader.map(|b| b.unwrap()).collect();
            let total: usize = batches.iter().map(|b| b.num_rows()).sum();
            assert_eq!(total, 2);
            assert_eq!(batches[0].schema().fields().len(), 61);
            assert_eq!(batches[0].schema(), batch.schema());
        }
    }
}
