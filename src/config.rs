use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::error::{EtlError, Result};

/// Configuration for a complete pipeline execution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub date_range: DateRangeConfig,
    pub ingest: IngestConfig,
    pub filters: FilterConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding the raw tab-separated exports
    pub data_dir: PathBuf,
    /// Directory every artifact is written to
    pub output_dir: PathBuf,
    pub iso_country_table: PathBuf,
    pub cameo_relation_table: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(constants::DEFAULT_DATA_DIR),
            output_dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            iso_country_table: PathBuf::from(constants::DEFAULT_ISO_COUNTRY_TABLE),
            cameo_relation_table: PathBuf::from(constants::DEFAULT_CAMEO_RELATION_TABLE),
        }
    }
}

/// Dataset coverage in `yyyymm`. Recorded with each run; the stages do not
/// filter on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRangeConfig {
    pub start: u32,
    pub end: u32,
}

impl Default for DateRangeConfig {
    fn default() -> Self {
        Self {
            start: constants::DEFAULT_START_DATE,
            end: constants::DEFAULT_END_DATE,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub on_file_error: ErrorHandlingStrategy,
}

/// Strategy for handling an unreadable or malformed input file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorHandlingStrategy {
    /// Log the failure, drop the whole file and keep going
    #[default]
    #[serde(rename = "skip")]
    SkipFailedFiles,
    /// Stop the run on the first failure
    #[serde(rename = "abort")]
    StopOnFirstError,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Drop rows whose news date is not exactly eight ASCII digits
    pub require_zero_padded_dates: bool,
    /// Relation code marking an unknown event type
    pub placeholder_event_code: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            require_zero_padded_dates: true,
            placeholder_event_code: constants::DEFAULT_PLACEHOLDER_EVENT_CODE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub parquet_compression: ParquetCompression,
    pub write_manifest: bool,
    pub write_metrics: bool,
    pub raw: ArtifactConfig,
    pub samedate: ArtifactConfig,
    pub urldate: ArtifactConfig,
    pub info: ArtifactConfig,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            parquet_compression: ParquetCompression::default(),
            write_manifest: true,
            write_metrics: true,
            raw: ArtifactConfig::new(&[OutputFormat::Parquet]),
            samedate: ArtifactConfig::new(&[OutputFormat::Parquet]),
            urldate: ArtifactConfig::new(&[OutputFormat::Csv]),
            info: ArtifactConfig::new(&[OutputFormat::Csv]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    pub formats: Vec<OutputFormat>,
}

impl ArtifactConfig {
    pub fn new(formats: &[OutputFormat]) -> Self {
        Self {
            formats: formats.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Parquet,
    /// Tab-delimited with a header row
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Parquet => "parquet",
            OutputFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParquetCompression {
    #[default]
    Snappy,
    Zstd,
    None,
}

impl Config {
    /// Load configuration from a TOML file. Missing keys fall back to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            EtlError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file when it exists, otherwise use the built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Pick the config source. An explicit path (flag first, then the
    /// environment) must exist; only the implicit default file may be absent.
    pub fn resolve(flag: Option<PathBuf>, env: Option<PathBuf>) -> Result<Self> {
        match flag.or(env) {
            Some(path) => Self::load(path),
            None => Self::load_or_default(constants::DEFAULT_CONFIG_PATH),
        }
    }

    /// Apply command-line directory overrides and re-validate.
    pub fn apply_overrides(
        &mut self,
        data_dir: Option<PathBuf>,
        output_dir: Option<PathBuf>,
    ) -> Result<()> {
        if let Some(dir) = data_dir {
            self.paths.data_dir = dir;
        }
        if let Some(dir) = output_dir {
            self.paths.output_dir = dir;
        }
        self.validate()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let paths = [
            ("paths.data_dir", &self.paths.data_dir),
            ("paths.output_dir", &self.paths.output_dir),
            ("paths.iso_country_table", &self.paths.iso_country_table),
            ("paths.cameo_relation_table", &self.paths.cameo_relation_table),
        ];
        for (key, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(EtlError::Config(format!("'{}' must not be empty", key)));
            }
        }

        if self.date_range.start > self.date_range.end {
            return Err(EtlError::Config(format!(
                "date_range.start ({}) is after date_range.end ({})",
                self.date_range.start, self.date_range.end
            )));
        }

        if self.filters.placeholder_event_code.trim().is_empty() {
            return Err(EtlError::Config(
                "filters.placeholder_event_code must not be empty".to_string(),
            ));
        }

        for (artifact, cfg) in self.output.artifacts() {
            if cfg.formats.is_empty() {
                return Err(EtlError::Config(format!(
                    "output.{}.formats must list at least one format",
                    artifact
                )));
            }
        }

        Ok(())
    }
}

impl OutputConfig {
    fn artifacts(&self) -> [(&'static str, &ArtifactConfig); 4] {
        [
            ("raw", &self.raw),
            ("samedate", &self.samedate),
            ("urldate", &self.urldate),
            ("info", &self.info),
        ]
    }
}
