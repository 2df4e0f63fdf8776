use std::path::{Path, PathBuf};

use tracing::info;

use tablesmith_core::{Table, TableStore};

use crate::errors::GenerationError;

/// Write every output-flagged table in the store as `<name>.csv` under the
/// given directory, header row first then row-major data.
pub fn write_store_csvs(dir: &Path, store: &TableStore) -> Result<Vec<PathBuf>, GenerationError> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for table in store.iter().filter(|table| table.output) {
        let path = dir.join(format!("{}.csv", table.name));
        write_table_csv(&path, table)?;
        info!(table = %table.name, rows = table.row_count(), path = %path.display(), "wrote csv");
        written.push(path);
    }

    Ok(written)
}

pub fn write_table_csv(path: &Path, table: &Table) -> Result<(), GenerationError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(&table.header)?;
    for row in table.rows() {
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
