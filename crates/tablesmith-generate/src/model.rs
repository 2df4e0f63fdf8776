use std::path::PathBuf;

use serde::Serialize;

use tablesmith_core::TableStore;

/// Options for the generation engine.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Seed for the run's random number generator; a random seed is drawn and
    /// logged when absent.
    pub seed: Option<u64>,
    /// Directory input-source paths are resolved against, normally the config
    /// file's directory.
    pub base_dir: PathBuf,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            base_dir: PathBuf::from("."),
        }
    }
}

/// Summary of one generated table.
#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    pub table: String,
    pub rows: u64,
    pub columns: u64,
    pub duration_ms: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub tables: Vec<TableReport>,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            tables: Vec::new(),
            duration_ms: 0,
        }
    }
}

/// Result of a generation run: the populated pool plus the run report.
#[derive(Debug)]
pub struct RunOutput {
    pub store: TableStore,
    pub report: GenerationReport,
}
