//! Stage metrics for the cleaning pipeline.
//!
//! A Prometheus recorder is installed without an HTTP listener; a batch run
//! renders the snapshot to a file once all stages finished.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::{debug, warn};

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the global recorder. Idempotent.
pub fn init_metrics() {
    HANDLE.get_or_init(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            debug!("Prometheus recorder installed");
            handle
        }
        Err(e) => {
            // Another recorder is already installed; keep a detached handle so
            // render() still works (it will just be empty).
            warn!("Failed to install Prometheus recorder: {}", e);
            PrometheusBuilder::new().build_recorder().handle()
        }
    });
}

/// Render the current snapshot in the Prometheus text format.
pub fn render() -> Option<String> {
    HANDLE.get().map(|h| h.render())
}

pub struct StageMetrics;

impl StageMetrics {
    pub fn record_stage(stage: &'static str, rows_in: usize, rows_out: usize, duration_secs: f64) {
        counter!("kg_stage_rows_in_total", "stage" => stage).increment(rows_in as u64);
        counter!("kg_stage_rows_out_total", "stage" => stage).increment(rows_out as u64);
        counter!("kg_stage_rows_dropped_total", "stage" => stage)
            .increment(rows_in.saturating_sub(rows_out) as u64);
        histogram!("kg_stage_duration_seconds", "stage" => stage).record(duration_secs);
    }

    pub fn record_drop_reason(reason: &'static str, count: usize) {
        counter!("kg_enrich_rows_dropped_total", "reason" => reason).increment(count as u64);
    }

    pub fn record_file_read(rows: usize) {
        counter!("kg_ingest_files_read_total").increment(1);
        histogram!("kg_ingest_rows_per_file").record(rows as f64);
    }

    pub fn record_file_skipped() {
        counter!("kg_ingest_files_skipped_total").increment(1);
    }

    pub fn record_artifact(format: &'static str, bytes: u64) {
        counter!("kg_artifacts_written_total", "format" => format).increment(1);
        histogram!("kg_artifact_bytes", "format" => format).record(bytes as f64);
    }
}
