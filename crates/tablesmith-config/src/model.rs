use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::ConfigError;

/// The entire contents of a config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// External tables loaded into the pool before generation.
    #[serde(default)]
    pub inputs: Vec<InputSpec>,
    /// Tables to generate, in declaration order.
    #[serde(default)]
    pub tables: Vec<TableSpec>,
}

impl Config {
    pub fn from_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }
}

/// A pre-loaded input table.
#[derive(Debug, Clone, Deserialize)]
pub struct InputSpec {
    pub name: String,
    #[serde(flatten)]
    pub source: InputSource,
}

/// Where an input table's data comes from.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "source", rename_all = "snake_case")]
pub enum InputSource {
    Csv(CsvSourceParams),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CsvSourceParams {
    /// Path relative to the config file's directory.
    pub file_name: PathBuf,
}

/// The instructions to generate one table.
#[derive(Debug, Clone, Deserialize)]
pub struct TableSpec {
    pub name: String,
    /// Declared row count; used only while the table is still empty.
    #[serde(default)]
    pub count: usize,
    /// Composite uniqueness key applied after generation.
    #[serde(default)]
    pub unique_columns: Vec<String>,
    /// Generate the table but do not export it.
    #[serde(default)]
    pub suppress: bool,
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
}

/// The instructions to populate one column.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: ColumnKind,
}

/// Closed set of column kinds; the tag selects the generation strategy and
/// the processor payload decodes into that strategy's parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "processor", rename_all = "snake_case")]
pub enum ColumnKind {
    Each(TableColumnRef),
    Const(ConstParams),
    Ref(TableColumnRef),
    Gen(GenParams),
    Set(SetParams),
    Inc(IncParams),
    Range(RangeParams),
    Match(MatchParams),
    Expr(ExprParams),
    Rand(RandParams),
    RelDate(RelDateParams),
    Cuid(CuidParams),
}

impl ColumnKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ColumnKind::Each(_) => "each",
            ColumnKind::Const(_) => "const",
            ColumnKind::Ref(_) => "ref",
            ColumnKind::Gen(_) => "gen",
            ColumnKind::Set(_) => "set",
            ColumnKind::Inc(_) => "inc",
            ColumnKind::Range(_) => "range",
            ColumnKind::Match(_) => "match",
            ColumnKind::Expr(_) => "expr",
            ColumnKind::Rand(_) => "rand",
            ColumnKind::RelDate(_) => "rel_date",
            ColumnKind::Cuid(_) => "cuid",
        }
    }
}

/// A reference to a column of another table.
#[derive(Debug, Clone, Deserialize)]
pub struct TableColumnRef {
    pub table: String,
    pub column: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConstParams {
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenParams {
    /// Template string with `${token}` placeholders.
    #[serde(default)]
    pub value: Option<String>,
    /// Regex pattern handed to the pattern-based generator.
    #[serde(default)]
    pub pattern: Option<String>,
    /// Whole-value template handed to the template engine.
    #[serde(default)]
    pub template: Option<String>,
    /// Percentage of rows emitted as empty strings.
    #[serde(default)]
    pub null_percentage: u8,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetParams {
    pub values: Vec<String>,
    /// When present, must parallel `values`; weight 0 excludes a value.
    #[serde(default)]
    pub weights: Vec<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncParams {
    pub start: i64,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeKind {
    Int,
    Date,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RangeParams {
    #[serde(rename = "type")]
    pub kind: RangeKind,
    #[serde(default)]
    pub from: Option<Scalar>,
    #[serde(default)]
    pub to: Option<Scalar>,
    #[serde(default)]
    pub step: Option<Scalar>,
    #[serde(default)]
    pub format: Option<String>,
    /// Continuation source: resume from this table's column's last value.
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub column: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchParams {
    pub source_table: String,
    pub source_column: String,
    pub source_value: String,
    pub match_column: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExprParams {
    pub expression: String,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandKind {
    Int,
    Float,
    Date,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RandParams {
    #[serde(rename = "type")]
    pub kind: RandKind,
    pub low: Scalar,
    pub high: Scalar,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateUnit {
    Day,
    Month,
    Year,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelDateParams {
    /// A literal date, the literal `now`, or the name of a sibling column.
    #[serde(default)]
    pub date: Option<String>,
    pub unit: DateUnit,
    #[serde(default)]
    pub low: i64,
    #[serde(default)]
    pub high: i64,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CuidParams {
    pub length: u16,
}

/// A YAML scalar that strategies parse according to their element type.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Int(value) => value.to_string(),
            Scalar::Float(value) => value.to_string(),
            Scalar::Bool(value) => value.to_string(),
            Scalar::Text(value) => value.clone(),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(value) => Some(*value),
            Scalar::Text(value) => value.trim().parse().ok(),
            Scalar::Float(_) | Scalar::Bool(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(value) => Some(*value as f64),
            Scalar::Float(value) => Some(*value),
            Scalar::Text(value) => value.trim().parse().ok(),
            Scalar::Bool(_) => None,
        }
    }
}
