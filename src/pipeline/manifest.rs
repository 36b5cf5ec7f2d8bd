use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

use super::export::ArtifactInfo;
use crate::config::DateRangeConfig;
use crate::constants::MANIFEST_FILE;
use crate::error::Result;

/// Row counts and files written by one stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub stage: &'static str,
    pub rows_in: usize,
    pub rows_out: usize,
    pub artifacts: Vec<ArtifactInfo>,
}

impl StageReport {
    pub fn dropped(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }
}

/// Run record written next to the artifacts
#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
    pub tool: &'static str,
    pub version: &'static str,
    #[serde(serialize_with = "rfc3339")]
    pub started_at: DateTime<Utc>,
    #[serde(serialize_with = "rfc3339")]
    pub finished_at: DateTime<Utc>,
    pub date_range: DateRangeConfig,
    pub data_dir: PathBuf,
    pub files_read: usize,
    pub files_skipped: usize,
    pub errors: Vec<String>,
    pub stages: Vec<StageReport>,
}

fn rfc3339<S: serde::Serializer>(ts: &DateTime<Utc>, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true))
}

impl RunManifest {
    /// Serialize as pretty JSON to `output_dir/manifest.json`.
    pub fn write(&self, output_dir: &Path) -> Result<PathBuf> {
        let path = output_dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        info!("🧾 Wrote run manifest to {}", path.display());
        Ok(path)
    }
}
