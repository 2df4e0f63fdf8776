//! Shared date parsing and arithmetic for the date-aware strategies.

use chrono::{Months, NaiveDate, NaiveDateTime, NaiveTime};

use tablesmith_config::DateUnit;

use crate::errors::GenerationError;

/// Parse a datetime using the column's format, accepting a plain date at
/// midnight when the format carries no time components.
pub(crate) fn parse_datetime(text: &str, fmt: &str) -> Result<NaiveDateTime, GenerationError> {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(text, fmt) {
        return Ok(datetime);
    }
    NaiveDate::parse_from_str(text, fmt)
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|err| GenerationError::Parse(format!("parsing date {text:?} as {fmt:?}: {err}")))
}

pub(crate) fn parse_date(text: &str, fmt: &str) -> Result<NaiveDate, GenerationError> {
    parse_datetime(text, fmt).map(|datetime| datetime.date())
}

/// Calendar-aware month shift; days clamp to the end of the target month.
pub(crate) fn add_months(date: NaiveDate, months: i64) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs() as u32))
    };
    shifted.unwrap_or(date)
}

pub(crate) fn shift_date(date: NaiveDate, unit: DateUnit, offset: i64) -> NaiveDate {
    match unit {
        DateUnit::Day => date
            .checked_add_signed(chrono::Duration::days(offset))
            .unwrap_or(date),
        DateUnit::Month => add_months(date, offset),
        DateUnit::Year => add_months(date, offset * 12),
    }
}
