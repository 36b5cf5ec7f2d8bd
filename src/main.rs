use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use kg_clean::config::Config;
use kg_clean::constants;
use kg_clean::pipeline::{Pipeline, PipelineResult};
use kg_clean::{logging, metrics};

#[derive(Parser)]
#[command(name = "kg_clean")]
#[command(about = "Clean raw GDELT event exports into an enriched knowledge-graph table")]
#[command(version)]
struct Cli {
    /// Path to the TOML config (falls back to KG_CLEAN_CONFIG, then kg_clean.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override paths.data_dir
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override paths.output_dir
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every stage and write the artifacts (default)
    Run,
    /// Validate config and lookup tables and list input files without reading them
    Check,
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let env_path = std::env::var_os("KG_CLEAN_CONFIG").map(PathBuf::from);
    let source = cli
        .config
        .clone()
        .or_else(|| env_path.clone())
        .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_CONFIG_PATH));

    let mut config = Config::resolve(cli.config.clone(), env_path)
        .with_context(|| format!("loading config from {}", source.display()))?;
    config.apply_overrides(cli.data_dir.clone(), cli.output_dir.clone())?;
    Ok(config)
}

fn print_results(result: &PipelineResult) {
    println!("\n📊 Pipeline Results:");
    println!("   Files read: {}", result.files_read);
    println!("   Files skipped: {}", result.files_skipped);
    for stage in &result.stages {
        println!(
            "   {:<12} {:>10} -> {:>10} ({} dropped)",
            stage.stage,
            stage.rows_in,
            stage.rows_out,
            stage.dropped()
        );
        for artifact in &stage.artifacts {
            println!("      {}", artifact.path.display());
        }
    }
    if let Some(path) = &result.manifest_file {
        println!("   Manifest: {}", path.display());
    }
    if let Some(path) = &result.metrics_file {
        println!("   Metrics: {}", path.display());
    }

    if !result.errors.is_empty() {
        warn!("{} input files failed during ingestion", result.errors.len());
        println!("\n⚠️  Errors encountered:");
        for error in &result.errors {
            println!("   - {}", error);
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            metrics::init_metrics();
            println!("🔄 Running cleaning pipeline...");
            match Pipeline::run(&config) {
                Ok(result) => {
                    info!("Pipeline finished");
                    print_results(&result);
                }
                Err(e) => {
                    error!("Pipeline failed: {}", e);
                    return Err(e.into());
                }
            }
        }
        Commands::Check => {
            let report = Pipeline::check(&config)?;
            println!("✅ Configuration OK");
            println!("   Country codes: {}", report.iso_entries);
            println!("   Relation codes: {}", report.cameo_entries);
            println!(
                "   Input files in {}: {}",
                config.paths.data_dir.display(),
                report.input_files.len()
            );
            for file in &report.input_files {
                println!("      {}", file.display());
            }
        }
    }

    Ok(())
}
