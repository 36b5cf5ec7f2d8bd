use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lookup table {path}:{line}: {message}")]
    Lookup {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Schema error in {path} at record {line}: {message}")]
    Schema {
        path: PathBuf,
        line: u64,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, EtlError>;
