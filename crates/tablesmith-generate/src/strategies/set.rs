//! Discrete sampling, uniform or weighted.

use rand::Rng;

use tablesmith_config::SetParams;

use crate::errors::GenerationError;
use crate::strategies::weighted::WeightedSet;
use crate::strategies::{ColumnStrategy, StrategyContext};

impl ColumnStrategy for SetParams {
    fn populate(&self, ctx: &mut StrategyContext<'_>) -> Result<(), GenerationError> {
        if self.values.is_empty() {
            return Err(GenerationError::InvalidColumn(
                "no values provided for set generator".to_string(),
            ));
        }

        let count = ctx.working_count();
        let mut values = Vec::with_capacity(count);

        if self.weights.is_empty() {
            for _ in 0..count {
                let index = ctx.rng.random_range(0..self.values.len());
                values.push(self.values[index].clone());
            }
        } else {
            let set = WeightedSet::new(&self.values, &self.weights)?;
            for _ in 0..count {
                values.push(set.choose(ctx.rng).to_string());
            }
        }

        ctx.write_column(values);
        Ok(())
    }
}
