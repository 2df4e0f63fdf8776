use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tablesmith_config::{validate_config, Config, ConfigError, IssueSeverity, ValidationIssue};
use tablesmith_generate::output::write_store_csvs;
use tablesmith_generate::{GenerateOptions, GenerationEngine, GenerationError};

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("config validation failed with {0} error(s)")]
    Validation(usize),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("serializing report: {0}")]
    Report(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "tablesmith", version, about = "Declarative CSV test-data generator")]
struct Cli {
    /// Path to the config file.
    #[arg(short = 'c', long)]
    config: PathBuf,
    /// Directory the generated CSV files are written to.
    #[arg(short = 'o', long, default_value = ".")]
    output: PathBuf,
    /// Seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
    /// Write the run report as JSON to this path.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let start = Instant::now();

    let config = Config::load(&cli.config)?;
    info!(config = %cli.config.display(), "loaded config file");

    let report = validate_config(&config);
    for issue in report.warnings.iter().chain(report.errors.iter()) {
        log_issue(issue);
    }
    if !report.is_ok() {
        return Err(CliError::Validation(report.errors.len()));
    }

    let base_dir = cli
        .config
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let engine = GenerationEngine::new(GenerateOptions {
        seed: cli.seed,
        base_dir,
    });
    let output = engine.run(&config)?;

    let written = write_store_csvs(&cli.output, &output.store)?;

    if let Some(report_path) = &cli.report {
        let json = serde_json::to_vec_pretty(&output.report)?;
        std::fs::write(report_path, json)?;
        info!(path = %report_path.display(), "wrote run report");
    }

    info!(
        files = written.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "wrote all csvs"
    );

    Ok(())
}

fn log_issue(issue: &ValidationIssue) {
    match issue.severity {
        IssueSeverity::Error => {
            error!(code = %issue.code, path = %issue.path, "{}", issue.message);
        }
        IssueSeverity::Warning => {
            warn!(code = %issue.code, path = %issue.path, "{}", issue.message);
        }
    }
}
