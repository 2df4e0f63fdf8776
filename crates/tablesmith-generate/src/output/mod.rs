//! Export of output-flagged tables.

pub mod csv;

pub use csv::{write_store_csvs, write_table_csv};
