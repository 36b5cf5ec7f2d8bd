use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use super::csv_out::write_tsv;
use super::parquet_out::write_parquet;
use super::table::TableRows;
use crate::config::{ArtifactConfig, OutputFormat, ParquetCompression};
use crate::error::Result;
use crate::metrics::StageMetrics;

/// One file written to the output directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactInfo {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub rows: usize,
    pub bytes: u64,
    /// Hex-encoded SHA-256 of the file contents
    pub sha256: String,
}

/// Hex SHA-256 of a file, streamed from disk.
pub fn file_sha256(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Write `rows` under `output_dir/<name>.<ext>` once per configured format.
pub fn write_artifact<T: TableRows>(
    rows: &[T],
    output_dir: &Path,
    name: &str,
    artifact: &ArtifactConfig,
    compression: ParquetCompression,
) -> Result<Vec<ArtifactInfo>> {
    let batch = T::record_batch(rows)?;

    let mut written = Vec::with_capacity(artifact.formats.len());
    for &format in &artifact.formats {
        let path = output_dir.join(format!("{}.{}", name, format.extension()));
        match format {
            OutputFormat::Parquet => write_parquet(&batch, &path, compression)?,
            OutputFormat::Csv => write_tsv(&batch, &path)?,
        }

        let bytes = fs::metadata(&path)?.len();
        let sha256 = file_sha256(&path)?;
        StageMetrics::record_artifact(format.extension(), bytes);
        info!("💾 Wrote {} ({} rows, {} bytes)", path.display(), rows.len(), bytes);

        written.push(ArtifactInfo {
            path,
            format,
            rows: rows.len(),
            bytes,
            sha256,
        });
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::event;
    use crate::types::EventRecord;
    use tempfile::tempdir;

    #[test]
    fn test_writes_every_configured_format() {
        let dir = tempdir().unwrap();
        let rows = vec![event(1, "20230101", "20230101000000", "u1")];
        let artifact = ArtifactConfig::new(&[OutputFormat::Csv, OutputFormat::Parquet]);

        let written =
            write_artifact(&rows, dir.path(), "kg_info", &artifact, ParquetCompression::Snappy)
                .unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(written[0].path, dir.path().join("kg_info.csv"));
        assert_eq!(written[1].path, dir.path().join("kg_info.parquet"));
        for info in &written {
            assert_eq!(info.rows, 1);
            assert_eq!(info.bytes, fs::metadata(&info.path).unwrap().len());
            assert_eq!(info.sha256.len(), 64);
            assert_eq!(info.sha256, file_sha256(&info.path).unwrap());
        }
    }

    #[test]
    fn test_empty_table_still_writes_header() {
        let dir = tempdir().unwrap();
        let rows: Vec<EventRecord> = Vec::new();
        let artifact = ArtifactConfig::new(&[OutputFormat::Csv]);

        let written =
            write_artifact(&rows, dir.path(), "kg_urldate", &artifact, ParquetCompression::None)
                .unwrap();

        let text = fs::read_to_string(&written[0].path).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("GlobalEventID\tDay\t"));
    }

    #[test]
    fn test_sha256_of_known_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("abc.txt");
        fs::write(&path, b"abc").unwrap();
        assert_eq!(
            file_sha256(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
