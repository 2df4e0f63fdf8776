//! The Tablesmith generation engine.
//!
//! Consumes a parsed config and fills a [`tablesmith_core::TableStore`] with
//! materialized tables: cartesian-expansion columns first, then the remaining
//! columns in declaration order, one strategy per column kind, with a
//! uniqueness pass at the end of every table.

pub mod engine;
pub mod errors;
pub mod model;
pub mod output;
pub mod source;
pub mod strategies;

pub use engine::{generate_table, GenerationEngine};
pub use errors::GenerationError;
pub use model::{GenerateOptions, GenerationReport, RunOutput, TableReport};
