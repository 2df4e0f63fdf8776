//! Dates at a random offset from a reference point.

use chrono::{Local, NaiveDate};
use rand::Rng;
use regex::Regex;

use tablesmith_config::RelDateParams;
use tablesmith_core::{format_cell, CellValue};

use crate::errors::GenerationError;
use crate::strategies::dates::{parse_date, shift_date};
use crate::strategies::{ColumnStrategy, StrategyContext};

enum Reference {
    Today,
    Literal(NaiveDate),
    /// A sibling column, re-parsed per row because each row may carry a
    /// different reference value.
    Column(Vec<String>),
}

impl ColumnStrategy for RelDateParams {
    fn populate(&self, ctx: &mut StrategyContext<'_>) -> Result<(), GenerationError> {
        let fmt = self.format.as_deref().unwrap_or("%Y-%m-%d");
        let count = ctx.working_count();

        let (mut low, mut high) = (self.low, self.high);
        if low > high {
            std::mem::swap(&mut low, &mut high);
        }

        let reference = resolve_reference(self, ctx, fmt)?;

        let mut values = Vec::with_capacity(count);
        for i in 0..count {
            let base = match &reference {
                Reference::Today => Local::now().date_naive(),
                Reference::Literal(date) => *date,
                Reference::Column(column) => {
                    let cell = column.get(i).ok_or_else(|| {
                        GenerationError::InvalidColumn(format!(
                            "reference column is shorter than row {i}"
                        ))
                    })?;
                    parse_date(cell, fmt)?
                }
            };

            let offset = ctx.rng.random_range(low..=high);
            let date = shift_date(base, self.unit, offset);
            values.push(format_cell(Some(fmt), &CellValue::Date(date)));
        }

        ctx.write_column(values);
        Ok(())
    }
}

fn resolve_reference(
    params: &RelDateParams,
    ctx: &StrategyContext<'_>,
    fmt: &str,
) -> Result<Reference, GenerationError> {
    let Some(text) = params.date.as_deref().filter(|text| !text.is_empty()) else {
        return Ok(Reference::Today);
    };
    if text == "now" {
        return Ok(Reference::Today);
    }

    let identifier = Regex::new(r"^[A-Za-z]\w*$")
        .map_err(|err| GenerationError::InvalidColumn(err.to_string()))?;
    if identifier.is_match(text) {
        let column = ctx.target()?.column(text)?.to_vec();
        return Ok(Reference::Column(column));
    }

    Ok(Reference::Literal(parse_date(text, fmt)?))
}
