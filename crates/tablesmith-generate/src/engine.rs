use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use tablesmith_config::{ColumnKind, Config, TableSpec};
use tablesmith_core::{Table, TableStore};

use crate::errors::GenerationError;
use crate::model::{GenerateOptions, GenerationReport, RunOutput, TableReport};
use crate::source::load_input;
use crate::strategies::{dispatch, each, StrategyContext};

/// Entry point for materializing every declared table out of a config.
#[derive(Debug, Clone, Default)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Load inputs and generate all tables strictly in declaration order.
    /// The first failing column aborts the whole run.
    pub fn run(&self, config: &Config) -> Result<RunOutput, GenerationError> {
        let start = Instant::now();
        let seed = self.options.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        info!(
            seed,
            inputs = config.inputs.len(),
            tables = config.tables.len(),
            "generation started"
        );

        let mut store = TableStore::new();
        for input in &config.inputs {
            load_input(&self.options.base_dir, input, &mut store)?;
        }

        let mut report = GenerationReport::new(seed);
        for spec in &config.tables {
            let table_start = Instant::now();
            generate_table(spec, &mut store, &mut rng)?;

            let (rows, columns) = store
                .get(&spec.name)
                .map(|table| (table.row_count() as u64, table.header.len() as u64))
                .unwrap_or((0, 0));
            let duration_ms = table_start.elapsed().as_millis() as u64;
            info!(table = %spec.name, rows, duration_ms, "table generated");

            report.tables.push(TableReport {
                table: spec.name.clone(),
                rows,
                columns,
                duration_ms,
            });
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            tables = report.tables.len(),
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(RunOutput { store, report })
    }
}

/// Generate one table into the store: each-columns first (they establish the
/// row count and ordering), then the remaining columns in declaration order,
/// then the uniqueness pass.
pub fn generate_table(
    spec: &TableSpec,
    store: &mut TableStore,
    rng: &mut ChaCha8Rng,
) -> Result<(), GenerationError> {
    each::generate_each_columns(spec, store)?;

    for column in &spec.columns {
        if matches!(column.kind, ColumnKind::Each(_)) {
            continue;
        }
        let mut ctx = StrategyContext {
            store: &mut *store,
            table: spec,
            column: &column.name,
            rng: &mut *rng,
        };
        dispatch(&column.kind, &mut ctx)
            .map_err(|source| GenerationError::for_column(&spec.name, &column.name, source))?;
    }

    let table = store.entry(&spec.name);
    table.unique_columns = spec.unique_columns.clone();
    table.output = !spec.suppress;
    check_row_counts(table)?;
    table
        .dedupe_rows()
        .map_err(|source| GenerationError::for_table(&spec.name, source.into()))?;

    Ok(())
}

fn check_row_counts(table: &Table) -> Result<(), GenerationError> {
    let expected = table.row_count();
    if table.columns.iter().any(|column| column.len() != expected) {
        return Err(GenerationError::for_table(
            &table.name,
            tablesmith_core::Error::InconsistentRowCounts {
                table: table.name.clone(),
            }
            .into(),
        ));
    }
    Ok(())
}
