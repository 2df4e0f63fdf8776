//! Loading of pre-declared input tables into the pool.

pub mod csv;

use std::path::Path;

use tablesmith_config::{InputSource, InputSpec};
use tablesmith_core::TableStore;

use crate::errors::GenerationError;

/// Load one declared input into the store. Input tables are never exported.
pub fn load_input(
    base_dir: &Path,
    input: &InputSpec,
    store: &mut TableStore,
) -> Result<(), GenerationError> {
    match &input.source {
        InputSource::Csv(params) => csv::load_csv_source(base_dir, &input.name, params, store),
    }
}
