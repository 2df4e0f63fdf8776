//! Rendering of typed cell values into their final string form.
//!
//! Formats follow two conventions, selected by the value's type: dates format
//! with strftime specifiers, everything else with a printf-style subset
//! (`%v`, `%d`, `%s`, `%f`, `%g`, `%t`, `%x`, `%X`, `%o`, `%b`, flags `0`,
//! `-` and `+`, width, precision). An absent or empty format renders the
//! default display form.

use std::fmt::Write as _;

use chrono::{NaiveDate, NaiveDateTime};

/// A typed value about to be rendered into a table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Str(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Str(value.to_string())
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}

/// Types that interpret a format specifier themselves instead of going
/// through the printf-style path.
pub trait CustomFormat {
    /// Render with the given specifier, or `None` when the specifier is not
    /// valid for this type.
    fn custom_format(&self, spec: &str) -> Option<String>;
}

impl CustomFormat for NaiveDate {
    fn custom_format(&self, spec: &str) -> Option<String> {
        let mut out = String::new();
        write!(out, "{}", self.format(spec)).ok()?;
        Some(out)
    }
}

impl CustomFormat for NaiveDateTime {
    fn custom_format(&self, spec: &str) -> Option<String> {
        let mut out = String::new();
        write!(out, "{}", self.format(spec)).ok()?;
        Some(out)
    }
}

/// Render a cell value, honoring the optional format specifier.
pub fn format_cell(spec: Option<&str>, value: &CellValue) -> String {
    let spec = match spec {
        Some(spec) if !spec.is_empty() => spec,
        _ => return default_display(value),
    };

    match value {
        CellValue::Date(date) => date
            .custom_format(spec)
            .unwrap_or_else(|| default_display(value)),
        CellValue::DateTime(datetime) => datetime
            .custom_format(spec)
            .unwrap_or_else(|| default_display(value)),
        _ => sprintf(spec, value),
    }
}

fn default_display(value: &CellValue) -> String {
    match value {
        CellValue::Int(value) => value.to_string(),
        CellValue::Float(value) => value.to_string(),
        CellValue::Bool(value) => value.to_string(),
        CellValue::Str(value) => value.clone(),
        CellValue::Date(value) => value.format("%Y-%m-%d").to_string(),
        CellValue::DateTime(value) => value.format("%Y-%m-%d").to_string(),
    }
}

fn sprintf(spec: &str, value: &CellValue) -> String {
    let mut out = String::new();
    let mut chars = spec.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        let mut zero_pad = false;
        let mut left_align = false;
        let mut plus_sign = false;
        while let Some(&flag) = chars.peek() {
            match flag {
                '0' => zero_pad = true,
                '-' => left_align = true,
                '+' => plus_sign = true,
                _ => break,
            }
            chars.next();
        }

        let mut width = 0usize;
        while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
            width = width * 10 + digit as usize;
            chars.next();
        }

        let mut precision = None;
        if chars.peek() == Some(&'.') {
            chars.next();
            let mut digits = 0usize;
            while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                digits = digits * 10 + digit as usize;
                chars.next();
            }
            precision = Some(digits);
        }

        let Some(verb) = chars.next() else {
            out.push('%');
            break;
        };

        match render_verb(verb, precision, value) {
            Some(rendered) => out.push_str(&pad(rendered, width, zero_pad, left_align, plus_sign)),
            None => {
                out.push('%');
                out.push(verb);
            }
        }
    }

    out
}

fn render_verb(verb: char, precision: Option<usize>, value: &CellValue) -> Option<String> {
    match verb {
        'd' => Some(as_int(value).to_string()),
        'f' => {
            let precision = precision.unwrap_or(6);
            Some(format!("{:.*}", precision, as_float(value)))
        }
        'g' | 'v' | 's' => Some(default_display(value)),
        't' => Some(matches!(value, CellValue::Bool(true)).to_string()),
        'x' => Some(format!("{:x}", as_int(value))),
        'X' => Some(format!("{:X}", as_int(value))),
        'o' => Some(format!("{:o}", as_int(value))),
        'b' => Some(format!("{:b}", as_int(value))),
        _ => None,
    }
}

fn as_int(value: &CellValue) -> i64 {
    match value {
        CellValue::Int(value) => *value,
        CellValue::Float(value) => *value as i64,
        CellValue::Bool(value) => *value as i64,
        CellValue::Str(value) => value.trim().parse().unwrap_or(0),
        CellValue::Date(_) | CellValue::DateTime(_) => 0,
    }
}

fn as_float(value: &CellValue) -> f64 {
    match value {
        CellValue::Int(value) => *value as f64,
        CellValue::Float(value) => *value,
        CellValue::Bool(value) => (*value as i64) as f64,
        CellValue::Str(value) => value.trim().parse().unwrap_or(0.0),
        CellValue::Date(_) | CellValue::DateTime(_) => 0.0,
    }
}

fn pad(rendered: String, width: usize, zero_pad: bool, left_align: bool, plus_sign: bool) -> String {
    let mut rendered = rendered;
    if plus_sign && !rendered.starts_with('-') && rendered.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        rendered.insert(0, '+');
    }

    if rendered.len() >= width {
        return rendered;
    }

    let fill = width - rendered.len();
    if left_align {
        rendered.push_str(&" ".repeat(fill));
        return rendered;
    }

    if zero_pad {
        let (sign, digits) = match rendered.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => match rendered.strip_prefix('+') {
                Some(rest) => ("+", rest),
                None => ("", rendered.as_str()),
            },
        };
        return format!("{sign}{}{digits}", "0".repeat(fill));
    }

    format!("{}{rendered}", " ".repeat(fill))
}
