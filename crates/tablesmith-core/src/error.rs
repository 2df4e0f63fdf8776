use thiserror::Error;

/// Errors raised by table store and table operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("table {0:?} not found")]
    MissingTable(String),
    #[error("column {column:?} not found in table {table:?}")]
    MissingColumn { table: String, column: String },
    #[error("unique column {column:?} is not part of table {table:?}")]
    UnknownUniqueColumn { table: String, column: String },
    #[error("table {table:?} has columns of differing lengths")]
    InconsistentRowCounts { table: String },
}

pub type Result<T> = std::result::Result<T, Error>;
