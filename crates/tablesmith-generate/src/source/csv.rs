use std::path::Path;

use tracing::info;

use tablesmith_config::CsvSourceParams;
use tablesmith_core::{transpose, Table, TableStore};

use crate::errors::GenerationError;

/// Read a CSV file from disk and add it to the pool as a non-exported table.
pub fn load_csv_source(
    base_dir: &Path,
    name: &str,
    params: &CsvSourceParams,
    store: &mut TableStore,
) -> Result<(), GenerationError> {
    let path = base_dir.join(&params.file_name);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(&path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    let mut columns = transpose(&rows);
    if columns.is_empty() {
        columns = vec![Vec::new(); headers.len()];
    }

    let mut table = Table::new(name);
    table.output = false;
    for (header, column) in headers.into_iter().zip(columns) {
        table.push_column(header, column);
    }

    info!(table = %name, rows = table.row_count(), path = %path.display(), "loaded input");
    store.insert(table);
    Ok(())
}
