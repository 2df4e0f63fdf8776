//! Row-count-aware arithmetic and string expressions over sibling columns.
//!
//! Expressions are delegated to `evalexpr`. Every already-generated column of
//! the current table is coerced and bound as a named parameter per row, in a
//! frozen trial order: int, float, bool, known date formats, then plain
//! string. Two builtins are installed: `match(table, key_column, key,
//! value_column)` for inline keyed lookups and `add_date(years, months, days,
//! date)` for calendar offsets.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use evalexpr::{
    build_operator_tree, ContextWithMutableFunctions, ContextWithMutableVariables, EvalexprError,
    Function, HashMapContext, Value as ExprValue,
};

use tablesmith_config::ExprParams;
use tablesmith_core::{format_cell, CellValue, TableStore};

use crate::errors::GenerationError;
use crate::strategies::dates::add_months;
use crate::strategies::{ColumnStrategy, StrategyContext};

const DATE_ONLY_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
];

impl ColumnStrategy for ExprParams {
    fn populate(&self, ctx: &mut StrategyContext<'_>) -> Result<(), GenerationError> {
        if self.expression.trim().is_empty() {
            return Err(GenerationError::InvalidColumn(
                "expression cannot be empty".to_string(),
            ));
        }

        let node = build_operator_tree(&self.expression).map_err(|err| {
            GenerationError::Expression(format!("parsing {:?}: {err}", self.expression))
        })?;

        let count = ctx.working_count();
        // Builtins need a snapshot they can own; source tables must already be
        // complete, so a clone observes the same data the run does.
        let snapshot = Arc::new(ctx.store.clone());

        let mut values = Vec::with_capacity(count);
        for row in 0..count {
            let mut context = HashMapContext::new();
            install_builtins(&mut context, &snapshot, self.format.clone())?;

            if let Some(table) = snapshot.get(&ctx.table.name) {
                for (index, name) in table.header.iter().enumerate() {
                    if let Some(cell) = table.columns[index].get(row) {
                        context
                            .set_value(name.clone(), coerce(cell))
                            .map_err(|err| GenerationError::Expression(err.to_string()))?;
                    }
                }
            }

            let result = node.eval_with_context(&context).map_err(|err| {
                GenerationError::Expression(format!(
                    "evaluating {:?}: {err}",
                    self.expression
                ))
            })?;
            values.push(render_result(result, self.format.as_deref()));
        }

        ctx.write_column(values);
        Ok(())
    }
}

fn install_builtins(
    context: &mut HashMapContext,
    snapshot: &Arc<TableStore>,
    format: Option<String>,
) -> Result<(), GenerationError> {
    let store = Arc::clone(snapshot);
    context
        .set_function(
            "match".to_string(),
            Function::new(move |argument: &ExprValue| {
                let args = argument.as_tuple()?;
                if args.len() != 4 {
                    return Err(EvalexprError::CustomMessage(
                        "match expects 4 arguments: match(table, key_column, key, value_column)"
                            .to_string(),
                    ));
                }
                let table_name = value_text(&args[0]);
                let key_column = value_text(&args[1]);
                let key = value_text(&args[2]);
                let value_column = value_text(&args[3]);

                let table = store.get(&table_name).ok_or_else(|| {
                    EvalexprError::CustomMessage(format!("table not found: {table_name}"))
                })?;
                let keys = table
                    .column(&key_column)
                    .map_err(|err| EvalexprError::CustomMessage(err.to_string()))?;
                let lookup_values = table
                    .column(&value_column)
                    .map_err(|err| EvalexprError::CustomMessage(err.to_string()))?;

                match keys.iter().position(|candidate| *candidate == key) {
                    Some(index) => Ok(coerce(&lookup_values[index])),
                    None => Err(EvalexprError::CustomMessage(format!(
                        "no value for key {key:?} in {table_name}.{key_column}"
                    ))),
                }
            }),
        )
        .map_err(|err| GenerationError::Expression(err.to_string()))?;

    let date_format = format.unwrap_or_else(|| "%Y-%m-%d".to_string());
    context
        .set_function(
            "add_date".to_string(),
            Function::new(move |argument: &ExprValue| {
                let args = argument.as_tuple()?;
                if args.len() != 4 {
                    return Err(EvalexprError::CustomMessage(
                        "add_date expects 4 arguments: add_date(years, months, days, date)"
                            .to_string(),
                    ));
                }
                let years = value_int(&args[0])?;
                let months = value_int(&args[1])?;
                let days = value_int(&args[2])?;
                let base = value_datetime(&args[3], &date_format)?;

                let shifted = add_months(base.date(), years * 12 + months)
                    .checked_add_signed(chrono::Duration::days(days))
                    .unwrap_or_else(|| base.date())
                    .and_time(base.time());
                Ok(ExprValue::String(format_cell(
                    Some(&date_format),
                    &CellValue::DateTime(shifted),
                )))
            }),
        )
        .map_err(|err| GenerationError::Expression(err.to_string()))?;

    Ok(())
}

/// Coerce a cell into the richest expression value it parses as. The trial
/// order is a frozen contract: changing it silently changes results.
pub(crate) fn coerce(text: &str) -> ExprValue {
    if let Ok(value) = text.parse::<i64>() {
        return ExprValue::Int(value);
    }
    if let Ok(value) = text.parse::<f64>() {
        return ExprValue::Float(value);
    }
    if let Ok(value) = text.parse::<bool>() {
        return ExprValue::Boolean(value);
    }
    if let Some(canonical) = canonical_date(text) {
        return ExprValue::String(canonical);
    }
    ExprValue::String(text.to_string())
}

/// Try the known date formats and normalize matches: plain dates render as
/// `%Y-%m-%d`, datetimes as `%Y-%m-%d %H:%M:%S`.
fn canonical_date(text: &str) -> Option<String> {
    for fmt in DATE_ONLY_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string());
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.naive_utc().format("%Y-%m-%d %H:%M:%S").to_string());
    }
    None
}

fn value_text(value: &ExprValue) -> String {
    match value {
        ExprValue::String(text) => text.clone(),
        ExprValue::Int(value) => value.to_string(),
        ExprValue::Float(value) => value.to_string(),
        ExprValue::Boolean(value) => value.to_string(),
        ExprValue::Empty => String::new(),
        ExprValue::Tuple(values) => values
            .iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join(","),
    }
}

fn value_int(value: &ExprValue) -> Result<i64, EvalexprError> {
    match value {
        ExprValue::Int(value) => Ok(*value),
        ExprValue::Float(value) => Ok(*value as i64),
        ExprValue::String(text) => text.trim().parse().map_err(|_| {
            EvalexprError::CustomMessage(format!("expected an integer, got {text:?}"))
        }),
        other => Err(EvalexprError::CustomMessage(format!(
            "expected an integer, got {other:?}"
        ))),
    }
}

fn value_datetime(value: &ExprValue, fmt: &str) -> Result<NaiveDateTime, EvalexprError> {
    match value {
        ExprValue::String(text) => {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(text, fmt) {
                return Ok(datetime);
            }
            if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
                return Ok(date.and_time(NaiveTime::MIN));
            }
            if let Ok(datetime) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
                return Ok(datetime);
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(|date| date.and_time(NaiveTime::MIN))
                .map_err(|_| {
                    EvalexprError::CustomMessage(format!("cannot parse date {text:?}"))
                })
        }
        // Numeric references are unix timestamps in seconds.
        ExprValue::Int(seconds) => DateTime::from_timestamp(*seconds, 0)
            .map(|datetime| datetime.naive_utc())
            .ok_or_else(|| EvalexprError::CustomMessage(format!("invalid timestamp {seconds}"))),
        ExprValue::Float(seconds) => DateTime::from_timestamp(*seconds as i64, 0)
            .map(|datetime| datetime.naive_utc())
            .ok_or_else(|| EvalexprError::CustomMessage(format!("invalid timestamp {seconds}"))),
        other => Err(EvalexprError::CustomMessage(format!(
            "cannot interpret {other:?} as a date"
        ))),
    }
}

fn render_result(value: ExprValue, format: Option<&str>) -> String {
    match value {
        ExprValue::String(text) => text,
        ExprValue::Int(value) => format_cell(format, &CellValue::Int(value)),
        ExprValue::Float(value) => format_cell(format, &CellValue::Float(value)),
        ExprValue::Boolean(value) => format_cell(format, &CellValue::Bool(value)),
        ExprValue::Empty => String::new(),
        ExprValue::Tuple(values) => values
            .iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join(","),
    }
}
