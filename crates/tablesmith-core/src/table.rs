use std::collections::HashSet;

use crate::array::transpose;
use crate::error::{Error, Result};

/// One materialized table: a header plus column-major string data.
///
/// Header order reflects generation order, not declaration order. All columns
/// are equal-length once the table is complete; intermediate inconsistency is
/// tolerated while strategies are still appending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub header: Vec<String>,
    pub columns: Vec<Vec<String>>,
    /// Columns whose combined values must be distinct across rows.
    pub unique_columns: Vec<String>,
    /// Whether the table is meant for export, as opposed to an input source
    /// or an intermediate join target.
    pub output: bool,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            header: Vec::new(),
            columns: Vec::new(),
            unique_columns: Vec::new(),
            output: true,
        }
    }

    /// Append one fully populated column.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.header.push(name.into());
        self.columns.push(values);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|header| header == name)
    }

    /// Look up a column's data by name.
    pub fn column(&self, name: &str) -> Result<&[String]> {
        self.column_index(name)
            .map(|index| self.columns[index].as_slice())
            .ok_or_else(|| Error::MissingColumn {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Effective row count: the length of the longest column.
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Row-major view of the table data.
    pub fn rows(&self) -> Vec<Vec<String>> {
        transpose(&self.columns)
    }

    /// Remove duplicate rows under the projection onto the unique columns,
    /// preserving first-seen order. A no-op without a uniqueness key.
    pub fn dedupe_rows(&mut self) -> Result<()> {
        if self.unique_columns.is_empty() {
            return Ok(());
        }

        let expected = self.row_count();
        if self.columns.iter().any(|column| column.len() != expected) {
            return Err(Error::InconsistentRowCounts {
                table: self.name.clone(),
            });
        }

        let mut key_indexes = Vec::with_capacity(self.unique_columns.len());
        for unique in &self.unique_columns {
            let index = self
                .column_index(unique)
                .ok_or_else(|| Error::UnknownUniqueColumn {
                    table: self.name.clone(),
                    column: unique.clone(),
                })?;
            key_indexes.push(index);
        }

        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for row in self.rows() {
            let key: Vec<String> = key_indexes.iter().map(|&index| row[index].clone()).collect();
            if seen.insert(key) {
                kept.push(row);
            }
        }

        self.columns = transpose(&kept);
        if self.columns.is_empty() {
            self.columns = vec![Vec::new(); self.header.len()];
        }
        Ok(())
    }
}
