use std::collections::HashSet;

use crate::model::{ColumnKind, Config, TableSpec};

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Structured validation issue with location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: String,
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    fn error(code: &str, path: String, message: String) -> Self {
        Self {
            severity: IssueSeverity::Error,
            code: code.to_string(),
            path,
            message,
        }
    }
}

/// Aggregated validation report.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true when there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push_error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    pub fn push_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }
}

/// Structurally validate a parsed config before generation starts.
///
/// Catches duplicate names, malformed kind parameters, and references to
/// tables that are not declared before their point of use.
pub fn validate_config(config: &Config) -> ValidationReport {
    let mut report = ValidationReport::default();

    let mut known_tables: HashSet<&str> = HashSet::new();
    for input in &config.inputs {
        if !known_tables.insert(&input.name) {
            report.push_error(ValidationIssue::error(
                "duplicate_input",
                format!("inputs.{}", input.name),
                format!("input {:?} is declared more than once", input.name),
            ));
        }
    }

    for table in &config.tables {
        if !known_tables.insert(&table.name) {
            report.push_error(ValidationIssue::error(
                "duplicate_table",
                format!("tables.{}", table.name),
                format!("table {:?} is declared more than once", table.name),
            ));
        }
        validate_table(table, &known_tables, &mut report);
    }

    report
}

fn validate_table(table: &TableSpec, known_tables: &HashSet<&str>, report: &mut ValidationReport) {
    let mut column_names: HashSet<&str> = HashSet::new();
    for column in &table.columns {
        if !column_names.insert(&column.name) {
            report.push_error(ValidationIssue::error(
                "duplicate_column",
                column_path(table, &column.name),
                format!(
                    "column {:?} is declared more than once in table {:?}",
                    column.name, table.name
                ),
            ));
        }
    }

    for unique in &table.unique_columns {
        if !column_names.contains(unique.as_str()) {
            report.push_error(ValidationIssue::error(
                "unknown_unique_column",
                format!("tables.{}.unique_columns", table.name),
                format!(
                    "unique column {:?} is not declared in table {:?}",
                    unique, table.name
                ),
            ));
        }
    }

    for (position, column) in table.columns.iter().enumerate() {
        validate_column(table, position, column, known_tables, report);
    }
}

fn validate_column(
    table: &TableSpec,
    position: usize,
    column: &crate::model::ColumnSpec,
    known_tables: &HashSet<&str>,
    report: &mut ValidationReport,
) {
    let path = column_path(table, &column.name);

    match &column.kind {
        ColumnKind::Each(params) | ColumnKind::Ref(params) => {
            check_source_table(&params.table, &path, known_tables, report);
        }
        ColumnKind::Const(params) => {
            if params.values.is_empty() {
                report.push_error(ValidationIssue::error(
                    "empty_values",
                    path,
                    "const column needs at least one value".to_string(),
                ));
            }
        }
        ColumnKind::Gen(params) => {
            let modes = [&params.value, &params.pattern, &params.template]
                .iter()
                .filter(|mode| mode.is_some())
                .count();
            if modes != 1 {
                report.push_error(ValidationIssue::error(
                    "gen_mode",
                    path.clone(),
                    "gen column needs exactly one of value, pattern or template".to_string(),
                ));
            }
            if params.null_percentage > 100 {
                report.push_error(ValidationIssue::error(
                    "null_percentage",
                    path,
                    "null_percentage cannot exceed 100".to_string(),
                ));
            }
        }
        ColumnKind::Set(params) => {
            if params.values.is_empty() {
                report.push_error(ValidationIssue::error(
                    "empty_values",
                    path.clone(),
                    "set column needs at least one value".to_string(),
                ));
            }
            if !params.weights.is_empty() && params.weights.len() != params.values.len() {
                report.push_error(ValidationIssue::error(
                    "weight_mismatch",
                    path,
                    format!(
                        "set column has {} values but {} weights",
                        params.values.len(),
                        params.weights.len()
                    ),
                ));
            }
        }
        ColumnKind::Inc(_) => {}
        ColumnKind::Range(params) => {
            match (&params.table, &params.column) {
                (Some(source_table), Some(_)) => {
                    check_source_table(source_table, &path, known_tables, report);
                }
                (None, None) => {
                    if params.from.is_none() {
                        report.push_error(ValidationIssue::error(
                            "missing_from",
                            path.clone(),
                            "range column needs a from value or a continuation source"
                                .to_string(),
                        ));
                    }
                }
                _ => {
                    report.push_error(ValidationIssue::error(
                        "partial_continuation",
                        path.clone(),
                        "range continuation needs both table and column".to_string(),
                    ));
                }
            }
        }
        ColumnKind::Match(params) => {
            check_source_table(&params.source_table, &path, known_tables, report);
            let match_position = table
                .columns
                .iter()
                .position(|sibling| sibling.name == params.match_column);
            match match_position {
                None => report.push_error(ValidationIssue::error(
                    "unknown_match_column",
                    path,
                    format!(
                        "match column {:?} is not declared in table {:?}",
                        params.match_column, table.name
                    ),
                )),
                Some(found) if found >= position => report.push_error(ValidationIssue::error(
                    "match_column_order",
                    path,
                    format!(
                        "match column {:?} must be declared before it is matched against",
                        params.match_column
                    ),
                )),
                Some(_) => {}
            }
        }
        ColumnKind::Expr(params) => {
            if params.expression.trim().is_empty() {
                report.push_error(ValidationIssue::error(
                    "empty_expression",
                    path,
                    "expr column needs a non-empty expression".to_string(),
                ));
            }
        }
        ColumnKind::Rand(_) | ColumnKind::RelDate(_) => {}
        ColumnKind::Cuid(params) => {
            if params.length == 0 {
                report.push_error(ValidationIssue::error(
                    "invalid_length",
                    path,
                    "cuid column needs a positive length".to_string(),
                ));
            }
        }
    }
}

fn check_source_table(
    source: &str,
    path: &str,
    known_tables: &HashSet<&str>,
    report: &mut ValidationReport,
) {
    if !known_tables.contains(source) {
        report.push_error(ValidationIssue::error(
            "unknown_source_table",
            path.to_string(),
            format!("source table {:?} is not declared before this column", source),
        ));
    }
}

fn column_path(table: &TableSpec, column: &str) -> String {
    format!("tables.{}.columns.{}", table.name, column)
}
