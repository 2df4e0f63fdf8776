//! Incrementing integer sequence. Purely deterministic.

use tablesmith_config::IncParams;
use tablesmith_core::{format_cell, CellValue};

use crate::errors::GenerationError;
use crate::strategies::{ColumnStrategy, StrategyContext};

impl ColumnStrategy for IncParams {
    fn populate(&self, ctx: &mut StrategyContext<'_>) -> Result<(), GenerationError> {
        let count = ctx.working_count();
        let values = (0..count)
            .map(|i| format_cell(self.format.as_deref(), &CellValue::Int(self.start + i as i64)))
            .collect();
        ctx.write_column(values);
        Ok(())
    }
}
