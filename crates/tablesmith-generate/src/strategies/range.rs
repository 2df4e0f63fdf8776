//! Ordered sequences between two bounds, for integers and dates.

use chrono::NaiveDateTime;

use tablesmith_config::{RangeKind, RangeParams, Scalar};
use tablesmith_core::{format_cell, CellValue};

use crate::errors::GenerationError;
use crate::strategies::dates::parse_datetime;
use crate::strategies::{ColumnStrategy, StrategyContext};

const SECONDS_PER_DAY: i64 = 86_400;

impl ColumnStrategy for RangeParams {
    /// Produce a strictly ordered sequence from `from` toward `to`. An
    /// explicit step is used directly; otherwise the span is divided into
    /// working-count equal increments (integer division truncates). With a
    /// continuation source, the sequence resumes from the source column's
    /// last value: the count is raised by one and the first element dropped.
    fn populate(&self, ctx: &mut StrategyContext<'_>) -> Result<(), GenerationError> {
        let mut count = ctx.working_count();
        let continuation = continuation_value(self, ctx)?;
        let drop_first = continuation.is_some();
        if drop_first {
            count += 1;
        }

        let mut values = match self.kind {
            RangeKind::Int => int_sequence(self, continuation, count)?,
            RangeKind::Date => date_sequence(self, continuation, count)?,
        };

        if drop_first && !values.is_empty() {
            values.remove(0);
        }

        ctx.write_column(values);
        Ok(())
    }
}

/// Last value of the continuation source column, when configured.
fn continuation_value(
    params: &RangeParams,
    ctx: &StrategyContext<'_>,
) -> Result<Option<String>, GenerationError> {
    let (Some(table), Some(column)) = (&params.table, &params.column) else {
        return Ok(None);
    };

    let source = ctx.store.expect(table)?.column(column)?;
    let last = source.last().ok_or_else(|| {
        GenerationError::InvalidColumn(format!(
            "continuation column {table}.{column} is empty"
        ))
    })?;
    Ok(Some(last.clone()))
}

fn from_text(params: &RangeParams, continuation: Option<String>) -> Result<String, GenerationError> {
    match continuation {
        Some(last) => Ok(last),
        None => params.from.as_ref().map(Scalar::to_text).ok_or_else(|| {
            GenerationError::InvalidColumn(
                "a from value must be provided to a range generator".to_string(),
            )
        }),
    }
}

fn int_sequence(
    params: &RangeParams,
    continuation: Option<String>,
    count: usize,
) -> Result<Vec<String>, GenerationError> {
    let from = parse_int(&from_text(params, continuation)?)?;
    let to = params.to.as_ref().map(|value| parse_int(&value.to_text())).transpose()?;

    let step = match &params.step {
        Some(step) => parse_int(&step.to_text())?,
        None => {
            let to = to.ok_or_else(|| missing_bound("to"))?;
            infer_step(to - from, count, "int")?
        }
    };
        if step == 0 {
            return Err(GenerationError::InvalidColumn(
                "range step cannot be zero".to_string(),
            ));
        }
        if count == 0 && to.is_none() {
            return Err(missing_bound("to"));
        }

        let mut values = Vec::new();
        let mut current = from;
        loop {
            if count > 0 && values.len() == count {
                break;
            }
            if let Some(to) = to {
                if (step > 0 && current > to) || (step < 0 && current < to) {
                    break;
                }
            }
            values.push(format_cell(params.format.as_deref(), &CellValue::Int(current)));
            current += step;
        }

        check_filled(values.len(), count)?;
        Ok(values)
    }

fn date_sequence(
    params: &RangeParams,
    continuation: Option<String>,
    count: usize,
) -> Result<Vec<String>, GenerationError> {
    let fmt = params.format.as_deref().unwrap_or("%Y-%m-%d");
    let from = parse_datetime(&from_text(params, continuation)?, fmt)?;
    let to = params
        .to
        .as_ref()
        .map(|value| parse_datetime(&value.to_text(), fmt))
        .transpose()?;

    // An explicit step is a whole number of days; the inferred step keeps
    // sub-day precision so the sequence lands exactly on `to`.
    let step_seconds = match &params.step {
            Some(step) => parse_int(&step.to_text())? * SECONDS_PER_DAY,
            None => {
                let to = to.ok_or_else(|| missing_bound("to"))?;
                infer_step((to - from).num_seconds(), count, "date")?
            }
        };
        if step_seconds == 0 {
            return Err(GenerationError::InvalidColumn(
                "range step cannot be zero".to_string(),
            ));
        }
        if count == 0 && to.is_none() {
            return Err(missing_bound("to"));
        }

        let mut values = Vec::new();
        let mut current = from;
        loop {
            if count > 0 && values.len() == count {
                break;
            }
            if let Some(to) = to {
                if (step_seconds > 0 && current >= to) || (step_seconds < 0 && current <= to) {
                    break;
                }
            }
            values.push(format_cell(Some(fmt), &CellValue::DateTime(current)));
            current = advance(current, step_seconds);
        }

        check_filled(values.len(), count)?;
        Ok(values)
    }

fn advance(current: NaiveDateTime, seconds: i64) -> NaiveDateTime {
    current
        .checked_add_signed(chrono::Duration::seconds(seconds))
        .unwrap_or(current)
}

fn parse_int(text: &str) -> Result<i64, GenerationError> {
    text.trim()
        .parse()
        .map_err(|err| GenerationError::Parse(format!("parsing number {text:?}: {err}")))
}

fn infer_step(span: i64, count: usize, kind: &str) -> Result<i64, GenerationError> {
    if count == 0 {
        return Err(GenerationError::InvalidColumn(format!(
            "either a count or a step must be provided to a {kind} range generator"
        )));
    }
    Ok(span / count as i64)
}

fn missing_bound(name: &str) -> GenerationError {
    GenerationError::InvalidColumn(format!(
        "a {name} value must be provided to a range generator"
    ))
}

fn check_filled(produced: usize, count: usize) -> Result<(), GenerationError> {
    if count > 0 && produced < count {
        return Err(GenerationError::InvalidColumn(format!(
            "range yields {produced} of {count} required rows; widen the bounds or the step"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablesmith_core::TableStore;

    use crate::strategies::testing::{populate, strings, table_spec};

    fn int_range(from: i64, to: i64, step: Option<i64>) -> RangeParams {
        RangeParams {
            kind: RangeKind::Int,
            from: Some(Scalar::Int(from)),
            to: Some(Scalar::Int(to)),
            step: step.map(Scalar::Int),
            format: None,
            table: None,
            column: None,
        }
    }

    fn date_range(from: &str, to: &str, step: Option<i64>) -> RangeParams {
        RangeParams {
            kind: RangeKind::Date,
            from: Some(Scalar::Text(from.to_string())),
            to: Some(Scalar::Text(to.to_string())),
            step: step.map(Scalar::Int),
            format: None,
            table: None,
            column: None,
        }
    }

    #[test]
    fn explicit_int_step_is_used_directly() {
        let mut store = TableStore::new();
        let spec = table_spec("t", 4);

        populate(&int_range(10, 40, Some(10)), &spec, "seq", &mut store, 1).unwrap();

        assert_eq!(
            store.expect("t").unwrap().column("seq").unwrap(),
            strings(&["10", "20", "30", "40"])
        );
    }

    #[test]
    fn inferred_int_step_truncates() {
        let mut store = TableStore::new();
        let spec = table_spec("t", 3);

        // span 7 over 3 rows: step = 7 / 3 = 2
        populate(&int_range(1, 8, None), &spec, "seq", &mut store, 1).unwrap();

        assert_eq!(
            store.expect("t").unwrap().column("seq").unwrap(),
            strings(&["1", "3", "5"])
        );
    }

    #[test]
    fn step_without_count_runs_to_the_bound() {
        let mut store = TableStore::new();
        let spec = table_spec("t", 0);

        populate(&int_range(1, 5, Some(2)), &spec, "seq", &mut store, 1).unwrap();

        assert_eq!(
            store.expect("t").unwrap().column("seq").unwrap(),
            strings(&["1", "3", "5"])
        );
    }

    #[test]
    fn inferred_date_step_can_repeat_the_first_day() {
        let mut store = TableStore::new();
        let spec = table_spec("t", 10);

        // span 9 days over 10 rows: 21.6h per step, so the first day repeats.
        populate(
            &date_range("2023-01-01", "2023-01-10", None),
            &spec,
            "day",
            &mut store,
            1,
        )
        .unwrap();

        assert_eq!(
            store.expect("t").unwrap().column("day").unwrap(),
            strings(&[
                "2023-01-01",
                "2023-01-01",
                "2023-01-02",
                "2023-01-03",
                "2023-01-04",
                "2023-01-05",
                "2023-01-06",
                "2023-01-07",
                "2023-01-08",
                "2023-01-09",
            ])
        );
    }

    #[test]
    fn explicit_date_step_stops_before_the_end() {
        let mut store = TableStore::new();
        let spec = table_spec("t", 0);

        populate(
            &date_range("2023-01-10", "2023-01-20", Some(3)),
            &spec,
            "day",
            &mut store,
            1,
        )
        .unwrap();

        assert_eq!(
            store.expect("t").unwrap().column("day").unwrap(),
            strings(&["2023-01-10", "2023-01-13", "2023-01-16", "2023-01-19"])
        );
    }

    #[test]
    fn continuation_resumes_past_the_source_column() {
        let mut store = TableStore::new();
        store
            .entry("earlier")
            .push_column("seq", strings(&["10", "20", "30"]));

        let spec = table_spec("t", 3);
        let params = RangeParams {
            kind: RangeKind::Int,
            from: None,
            to: None,
            step: Some(Scalar::Int(10)),
            format: None,
            table: Some("earlier".to_string()),
            column: Some("seq".to_string()),
        };

        populate(&params, &spec, "seq", &mut store, 1).unwrap();

        assert_eq!(
            store.expect("t").unwrap().column("seq").unwrap(),
            strings(&["40", "50", "60"])
        );
    }

    #[test]
    fn needs_a_count_or_a_step() {
        let mut store = TableStore::new();
        let spec = table_spec("t", 0);

        let err = populate(&int_range(1, 5, None), &spec, "seq", &mut store, 1).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidColumn(_)));
    }

    #[test]
    fn short_sequences_are_an_error_not_a_ragged_column() {
        let mut store = TableStore::new();
        let spec = table_spec("t", 10);

        let err = populate(&int_range(1, 4, Some(1)), &spec, "seq", &mut store, 1).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidColumn(_)));
    }

    #[test]
    fn rejects_unparseable_bounds() {
        let mut store = TableStore::new();
        let spec = table_spec("t", 3);

        let err = populate(
            &date_range("abc", "2023-01-10", None),
            &spec,
            "day",
            &mut store,
            1,
        )
        .unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }
}
