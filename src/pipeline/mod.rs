// Data processing pipeline: ingestion, processing, and export

pub mod csv_out;
pub mod export;
pub mod ingestion;
pub mod manifest;
pub mod orchestrator;
pub mod parquet_out;
pub mod processing;
pub mod table;

pub use export::{write_artifact, ArtifactInfo};
pub use manifest::{RunManifest, StageReport};
pub use orchestrator::{CheckReport, Pipeline, PipelineResult};
pub use table::TableRows;
