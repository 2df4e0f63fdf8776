//! Declarative-spec model and validation for Tablesmith.
//!
//! A config file declares input sources and tables; each table column carries
//! a kind tag plus a kind-specific processor payload, decoded here into a
//! strongly typed variant per kind.

pub mod errors;
pub mod model;
pub mod validate;

pub use errors::ConfigError;
pub use model::{
    ColumnKind, ColumnSpec, Config, ConstParams, CsvSourceParams, CuidParams, DateUnit,
    ExprParams, GenParams, IncParams, InputSource, InputSpec, MatchParams, RandKind, RandParams,
    RangeKind, RangeParams, RelDateParams, Scalar, SetParams, TableColumnRef, TableSpec,
};
pub use validate::{validate_config, IssueSeverity, ValidationIssue, ValidationReport};
