//! Foreign-key sampling from a previously generated table.

use rand::Rng;

use tablesmith_config::TableColumnRef;

use crate::errors::GenerationError;
use crate::strategies::{ColumnStrategy, StrategyContext};

impl ColumnStrategy for TableColumnRef {
    /// Sample one source value per row, uniformly and independently; the same
    /// value may repeat.
    fn populate(&self, ctx: &mut StrategyContext<'_>) -> Result<(), GenerationError> {
        let count = ctx.working_count();
        let source = ctx.store.expect(&self.table)?.column(&self.column)?;

        if source.is_empty() && count > 0 {
            return Err(GenerationError::InvalidColumn(format!(
                "source column {}.{} is empty",
                self.table, self.column
            )));
        }

        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            let index = ctx.rng.random_range(0..source.len());
            values.push(source[index].clone());
        }

        ctx.write_column(values);
        Ok(())
    }
}
