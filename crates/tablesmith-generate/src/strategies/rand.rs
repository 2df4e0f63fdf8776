//! Bounded random scalar and date sampling.

use rand::Rng;

use tablesmith_config::{RandKind, RandParams};
use tablesmith_core::{format_cell, CellValue};

use crate::errors::GenerationError;
use crate::strategies::dates::parse_datetime;
use crate::strategies::{ColumnStrategy, StrategyContext};

impl ColumnStrategy for RandParams {
    /// Draw one value per row uniformly from [low, high], inclusive where the
    /// type allows. Inverted bounds are swapped.
    fn populate(&self, ctx: &mut StrategyContext<'_>) -> Result<(), GenerationError> {
        let count = ctx.working_count();

        let values = match self.kind {
            RandKind::Int => {
                let mut low = int_bound(&self.low, "low")?;
                let mut high = int_bound(&self.high, "high")?;
                if low > high {
                    std::mem::swap(&mut low, &mut high);
                }
                (0..count)
                    .map(|_| {
                        let value = ctx.rng.random_range(low..=high);
                        format_cell(self.format.as_deref(), &CellValue::Int(value))
                    })
                    .collect()
            }
            RandKind::Float => {
                let mut low = float_bound(&self.low, "low")?;
                let mut high = float_bound(&self.high, "high")?;
                if low > high {
                    std::mem::swap(&mut low, &mut high);
                }
                (0..count)
                    .map(|_| {
                        let value = ctx.rng.random_range(low..=high);
                        format_cell(self.format.as_deref(), &CellValue::Float(value))
                    })
                    .collect()
            }
            RandKind::Date => {
                let fmt = self.format.as_deref().unwrap_or("%Y-%m-%d");
                let mut low = parse_datetime(&self.low.to_text(), fmt)?;
                let mut high = parse_datetime(&self.high.to_text(), fmt)?;
                if low > high {
                    std::mem::swap(&mut low, &mut high);
                }
                let span = (high - low).num_seconds();
                if span <= 0 {
                    return Err(GenerationError::InvalidColumn(
                        "no range found between low and high dates".to_string(),
                    ));
                }
                (0..count)
                    .map(|_| {
                        let offset = ctx.rng.random_range(0..=span);
                        let value = low + chrono::Duration::seconds(offset);
                        format_cell(Some(fmt), &CellValue::DateTime(value))
                    })
                    .collect()
            }
        };

        ctx.write_column(values);
        Ok(())
    }
}

fn int_bound(scalar: &tablesmith_config::Scalar, name: &str) -> Result<i64, GenerationError> {
    scalar.as_i64().ok_or_else(|| {
        GenerationError::Parse(format!("{name} bound {:?} is not an integer", scalar.to_text()))
    })
}

fn float_bound(scalar: &tablesmith_config::Scalar, name: &str) -> Result<f64, GenerationError> {
    scalar.as_f64().ok_or_else(|| {
        GenerationError::Parse(format!("{name} bound {:?} is not a number", scalar.to_text()))
    })
}
