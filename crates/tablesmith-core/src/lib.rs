//! Core contracts and helpers for Tablesmith.
//!
//! This crate defines the materialized table model, the shared table store,
//! the cartesian/transpose array helpers, and the value formatter used by
//! every column strategy.

pub mod array;
pub mod error;
pub mod format;
pub mod store;
pub mod table;

pub use array::{cartesian_product, transpose};
pub use error::{Error, Result};
pub use format::{format_cell, CellValue, CustomFormat};
pub use store::TableStore;
pub use table::Table;
