//! Fixed repeating values.

use tablesmith_config::ConstParams;

use crate::errors::GenerationError;
use crate::strategies::{cycle_to, ColumnStrategy, StrategyContext};

impl ColumnStrategy for ConstParams {
    /// Cycle the literal values up to the working row count, or take only the
    /// needed head when more values than rows were supplied.
    fn populate(&self, ctx: &mut StrategyContext<'_>) -> Result<(), GenerationError> {
        if self.values.is_empty() {
            return Err(GenerationError::InvalidColumn(
                "no values provided for const generator".to_string(),
            ));
        }

        let count = ctx.working_count();
        ctx.write_column(cycle_to(&self.values, count));
        Ok(())
    }
}
