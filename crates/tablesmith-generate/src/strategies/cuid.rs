//! Opaque collision-resistant identifiers.

use tablesmith_config::CuidParams;

use crate::errors::GenerationError;
use crate::strategies::{ColumnStrategy, StrategyContext};

impl ColumnStrategy for CuidParams {
    fn populate(&self, ctx: &mut StrategyContext<'_>) -> Result<(), GenerationError> {
        if self.length == 0 {
            return Err(GenerationError::InvalidColumn(
                "invalid length provided for cuid generator".to_string(),
            ));
        }

        let constructor = cuid2::CuidConstructor::new().with_length(self.length);
        let count = ctx.working_count();
        let values = (0..count).map(|_| constructor.create_id()).collect();

        ctx.write_column(values);
        Ok(())
    }
}
