use thiserror::Error;

/// Errors emitted by the generation engine.
///
/// The orchestrator wraps every strategy failure with the offending table and
/// column; the run stops at the first error.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("table {table:?}, column {column:?}: {source}")]
    Column {
        table: String,
        column: String,
        #[source]
        source: Box<GenerationError>,
    },
    #[error("table {table:?}: {source}")]
    Table {
        table: String,
        #[source]
        source: Box<GenerationError>,
    },
    #[error(transparent)]
    Store(#[from] tablesmith_core::Error),
    #[error("invalid column config: {0}")]
    InvalidColumn(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("expression error: {0}")]
    Expression(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl GenerationError {
    pub fn for_column(table: &str, column: &str, source: GenerationError) -> Self {
        GenerationError::Column {
            table: table.to_string(),
            column: column.to_string(),
            source: Box::new(source),
        }
    }

    pub fn for_table(table: &str, source: GenerationError) -> Self {
        GenerationError::Table {
            table: table.to_string(),
            source: Box::new(source),
        }
    }
}
