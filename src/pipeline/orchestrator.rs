use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::export::write_artifact;
use super::ingestion::{dedupe_by_id, ingest_directory, list_input_files};
use super::manifest::{RunManifest, StageReport};
use super::processing::{enrich_and_format, filter_date_consistent, filter_url_earliest};
use crate::config::Config;
use crate::constants::{
    INFO_ARTIFACT, METRICS_FILE, RAW_ARTIFACT, SAMEDATE_ARTIFACT, URLDATE_ARTIFACT,
};
use crate::error::Result;
use crate::metrics::{self, StageMetrics};
use crate::reference::LookupTable;

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub files_read: usize,
    pub files_skipped: usize,
    pub errors: Vec<String>,
    pub stages: Vec<StageReport>,
    pub manifest_file: Option<PathBuf>,
    pub metrics_file: Option<PathBuf>,
}

impl PipelineResult {
    pub fn stage(&self, name: &str) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == name)
    }

    /// Rows in the final enriched table
    pub fn final_rows(&self) -> usize {
        self.stages.last().map(|s| s.rows_out).unwrap_or(0)
    }
}

/// What a dry check found without reading event data
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub input_files: Vec<PathBuf>,
    pub iso_entries: usize,
    pub cameo_entries: usize,
}

pub struct Pipeline;

impl Pipeline {
    /// Run every stage over `config.paths.data_dir` and write the artifacts.
    #[instrument(skip_all, fields(data_dir = %config.paths.data_dir.display()))]
    pub fn run(config: &Config) -> Result<PipelineResult> {
        let started_at = Utc::now();
        let output_dir = &config.paths.output_dir;
        let output = &config.output;
        info!(
            "🚀 Starting cleaning run for {}..{} into {}",
            config.date_range.start,
            config.date_range.end,
            output_dir.display()
        );

        fs::create_dir_all(output_dir)?;
        let (iso, cameo) = Self::load_lookups(config)?;

        let mut stages = Vec::new();

        let timer = Instant::now();
        let ingested = ingest_directory(&config.paths.data_dir, config.ingest.on_file_error)?;
        let (files_read, files_skipped, errors) =
            (ingested.files_read, ingested.files_skipped, ingested.errors);
        let rows_read = ingested.records.len();
        StageMetrics::record_stage("ingest", rows_read, rows_read, timer.elapsed().as_secs_f64());

        let timer = Instant::now();
        let raw = dedupe_by_id(ingested.records);
        StageMetrics::record_stage("dedupe", rows_read, raw.len(), timer.elapsed().as_secs_f64());
        info!("🔑 Deduplicated {} rows to {} unique events", rows_read, raw.len());
        let artifacts = write_artifact(
            &raw,
            output_dir,
            RAW_ARTIFACT,
            &output.raw,
            output.parquet_compression,
        )?;
        stages.push(StageReport {
            stage: "dedupe",
            rows_in: rows_read,
            rows_out: raw.len(),
            artifacts,
        });

        let timer = Instant::now();
        let (dated, report) =
            filter_date_consistent(raw, config.filters.require_zero_padded_dates);
        StageMetrics::record_stage(
            "date_filter",
            report.rows_in,
            report.rows_out,
            timer.elapsed().as_secs_f64(),
        );
        info!(
            "📅 Date filter kept {} of {} rows ({} mismatched, {} malformed)",
            report.rows_out, report.rows_in, report.mismatched, report.malformed_dates
        );
        let artifacts = write_artifact(
            &dated,
            output_dir,
            SAMEDATE_ARTIFACT,
            &output.samedate,
            output.parquet_compression,
        )?;
        stages.push(StageReport {
            stage: "date_filter",
            rows_in: report.rows_in,
            rows_out: report.rows_out,
            artifacts,
        });

        let timer = Instant::now();
        let rows_in = dated.len();
        let url_dated = filter_url_earliest(dated);
        StageMetrics::record_stage(
            "url_filter",
            rows_in,
            url_dated.len(),
            timer.elapsed().as_secs_f64(),
        );
        info!("🔗 URL filter kept {} of {} rows", url_dated.len(), rows_in);
        let artifacts = write_artifact(
            &url_dated,
            output_dir,
            URLDATE_ARTIFACT,
            &output.urldate,
            output.parquet_compression,
        )?;
        stages.push(StageReport {
            stage: "url_filter",
            rows_in,
            rows_out: url_dated.len(),
            artifacts,
        });

        let timer = Instant::now();
        let (enriched, report) = enrich_and_format(
            url_dated,
            &iso,
            &cameo,
            &config.filters.placeholder_event_code,
        );
        StageMetrics::record_stage(
            "enrich",
            report.rows_in,
            report.rows_out,
            timer.elapsed().as_secs_f64(),
        );
        for (reason, count) in report.drops() {
            StageMetrics::record_drop_reason(reason.as_str(), count);
        }
        info!(
            "🌍 Enrichment kept {} of {} rows (missing code {}, unknown country {}, same country {}, placeholder {}, unknown relation {})",
            report.rows_out,
            report.rows_in,
            report.missing_country_code,
            report.unknown_country_code,
            report.same_country,
            report.placeholder_event_code,
            report.unknown_relation_code
        );
        let artifacts = write_artifact(
            &enriched,
            output_dir,
            INFO_ARTIFACT,
            &output.info,
            output.parquet_compression,
        )?;
        stages.push(StageReport {
            stage: "enrich",
            rows_in: report.rows_in,
            rows_out: report.rows_out,
            artifacts,
        });

        let manifest_file = if output.write_manifest {
            let manifest = RunManifest {
                tool: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
                started_at,
                finished_at: Utc::now(),
                date_range: config.date_range,
                data_dir: config.paths.data_dir.clone(),
                files_read,
                files_skipped,
                errors: errors.clone(),
                stages: stages.clone(),
            };
            Some(manifest.write(output_dir)?)
        } else {
            None
        };

        let metrics_file = if output.write_metrics {
            match metrics::render() {
                Some(snapshot) => {
                    let path = output_dir.join(METRICS_FILE);
                    fs::write(&path, snapshot)?;
                    Some(path)
                }
                None => {
                    warn!("Metrics recorder not installed, skipping {}", METRICS_FILE);
                    None
                }
            }
        } else {
            None
        };

        let result = PipelineResult {
            files_read,
            files_skipped,
            errors,
            stages,
            manifest_file,
            metrics_file,
        };
        info!("✅ Cleaning run finished with {} enriched events", result.final_rows());
        Ok(result)
    }

    /// Validate inputs without reading any event data.
    pub fn check(config: &Config) -> Result<CheckReport> {
        config.validate()?;
        let (iso, cameo) = Self::load_lookups(config)?;
        let input_files = list_input_files(&config.paths.data_dir)?;
        Ok(CheckReport {
            input_files,
            iso_entries: iso.len(),
            cameo_entries: cameo.len(),
        })
    }

    fn load_lookups(config: &Config) -> Result<(LookupTable, LookupTable)> {
        let iso = LookupTable::load(&config.paths.iso_country_table)?;
        let cameo = LookupTable::load(&config.paths.cameo_relation_table)?;
        info!(
            "📚 Loaded {} country codes and {} relation codes",
            iso.len(),
            cameo.len()
        );
        Ok((iso, cameo))
    }
}
