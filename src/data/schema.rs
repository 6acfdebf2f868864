//! Canonical schema validation.
//!
//! Validation is a gate: it never modifies the table. Every failing column is
//! reported at once so callers can fix all problems in a single pass.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::normalize::parse_date;
use super::record::{
    CanonicalRecord, DAILY_COST, DATA_TRANSFER_GB, DATE, EC2_HOURS, LAMBDA_INVOCATIONS,
    RDS_USAGE, STORAGE_GB,
};
use super::table::{Table, Value};

/// Expected cell type of a canonical column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Date,
    Float,
    Int,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Date => write!(f, "date"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Int => write!(f, "int"),
        }
    }
}

/// Declared constraints for one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRule {
    pub name: &'static str,
    pub kind: ColumnType,
    pub non_negative: bool,
}

const fn rule(name: &'static str, kind: ColumnType, non_negative: bool) -> ColumnRule {
    ColumnRule {
        name,
        kind,
        non_negative,
    }
}

/// The canonical training-table schema
pub const CANONICAL_SCHEMA: [ColumnRule; 7] = [
    rule(DATE, ColumnType::Date, false),
    rule(EC2_HOURS, ColumnType::Float, true),
    rule(STORAGE_GB, ColumnType::Float, true),
    rule(DATA_TRANSFER_GB, ColumnType::Float, true),
    rule(RDS_USAGE, ColumnType::Float, true),
    rule(LAMBDA_INVOCATIONS, ColumnType::Int, true),
    rule(DAILY_COST, ColumnType::Float, true),
];

/// A single problem found in a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Problem {
    /// Column is absent from the table
    MissingColumn,
    /// Empty cells
    MissingValues { rows: usize },
    /// Cells of the wrong type
    WrongType { expected: ColumnType, rows: usize },
    /// Cells that do not parse as a calendar date
    InvalidDate { rows: usize },
    /// Values below zero
    Negative { rows: usize },
    /// Fractional values in an integer column
    NonIntegral { rows: usize },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::MissingColumn => write!(f, "column is missing"),
            Problem::MissingValues { rows } => write!(f, "{rows} empty value(s)"),
            Problem::WrongType { expected, rows } => {
                write!(f, "{rows} value(s) are not of type {expected}")
            }
            Problem::InvalidDate { rows } => write!(f, "{rows} value(s) are not valid dates"),
            Problem::Negative { rows } => write!(f, "{rows} negative value(s)"),
            Problem::NonIntegral { rows } => write!(f, "{rows} non-integral value(s)"),
        }
    }
}

/// All problems found in one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnFailure {
    pub column: String,
    pub problems: Vec<Problem>,
}

impl fmt::Display for ColumnFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let problems: Vec<String> = self.problems.iter().map(ToString::to_string).collect();
        write!(f, "{}: {}", self.column, problems.join(", "))
    }
}

/// Canonical-shaped table failed type or range checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{}", render_failures(.failures))]
pub struct SchemaViolation {
    /// Every failing column, in schema order
    pub failures: Vec<ColumnFailure>,
}

fn render_failures(failures: &[ColumnFailure]) -> String {
    let mut msg = format!("Schema validation failed for {} column(s)", failures.len());
    for failure in failures {
        msg.push_str(&format!("\n  - {failure}"));
    }
    msg
}

impl SchemaViolation {
    /// Names of the failing columns
    pub fn columns(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.column.as_str()).collect()
    }

    /// Problems recorded for a column, if it failed
    pub fn failure(&self, column: &str) -> Option<&ColumnFailure> {
        self.failures.iter().find(|f| f.column == column)
    }
}

#[derive(Default)]
struct Tally {
    missing: usize,
    wrong_type: usize,
    invalid_date: usize,
    negative: usize,
    non_integral: usize,
}

impl Tally {
    fn into_problems(self, kind: ColumnType) -> Vec<Problem> {
        let mut problems = Vec::new();
        if self.missing > 0 {
            problems.push(Problem::MissingValues { rows: self.missing });
        }
        if self.wrong_type > 0 {
            problems.push(Problem::WrongType {
                expected: kind,
                rows: self.wrong_type,
            });
        }
        if self.invalid_date > 0 {
            problems.push(Problem::InvalidDate {
                rows: self.invalid_date,
            });
        }
        if self.negative > 0 {
            problems.push(Problem::Negative {
                rows: self.negative,
            });
        }
        if self.non_integral > 0 {
            problems.push(Problem::NonIntegral {
                rows: self.non_integral,
            });
        }
        problems
    }
}

fn check_column(table: &Table, rule: &ColumnRule) -> Vec<Problem> {
    let Some(cells) = table.column(rule.name) else {
        return vec![Problem::MissingColumn];
    };

    let mut tally = Tally::default();
    for cell in cells {
        match (rule.kind, cell) {
            (_, Value::Missing) => tally.missing += 1,
            (ColumnType::Date, Value::Date(_)) => {}
            (ColumnType::Date, Value::Text(s)) if parse_date(s).is_some() => {}
            (ColumnType::Date, _) => tally.invalid_date += 1,
            (ColumnType::Float | ColumnType::Int, Value::Int(i)) => {
                if rule.non_negative && *i < 0 {
                    tally.negative += 1;
                }
            }
            (_, Value::Float(v)) if !v.is_finite() => tally.wrong_type += 1,
            (kind, Value::Float(v)) => {
                if rule.non_negative && *v < 0.0 {
                    tally.negative += 1;
                }
                if kind == ColumnType::Int && v.fract() != 0.0 {
                    tally.non_integral += 1;
                }
            }
            (_, Value::Text(_) | Value::Date(_)) => tally.wrong_type += 1,
        }
    }
    tally.into_problems(rule.kind)
}

/// Check that `table` conforms to the canonical schema.
///
/// Float columns accept integer cells; the invocation column accepts
/// floats with no fractional part. Extra columns are ignored.
pub fn validate(table: &Table) -> Result<(), SchemaViolation> {
    let failures: Vec<ColumnFailure> = CANONICAL_SCHEMA
        .iter()
        .filter_map(|rule| {
            let problems = check_column(table, rule);
            (!problems.is_empty()).then(|| ColumnFailure {
                column: rule.name.to_string(),
                problems,
            })
        })
        .collect();

    if failures.is_empty() {
        log::debug!("Schema validation passed ({} rows)", table.len());
        Ok(())
    } else {
        Err(SchemaViolation { failures })
    }
}

/// Validate and convert a canonical table into typed records
pub fn records(table: &Table) -> Result<Vec<CanonicalRecord>, SchemaViolation> {
    validate(table)?;

    let idx = |name: &str| {
        table.column_index(name).ok_or_else(|| SchemaViolation {
            failures: vec![ColumnFailure {
                column: name.to_string(),
                problems: vec![Problem::MissingColumn],
            }],
        })
    };
    let date_idx = idx(DATE)?;
    let ec2 = idx(EC2_HOURS)?;
    let storage = idx(STORAGE_GB)?;
    let transfer = idx(DATA_TRANSFER_GB)?;
    let rds = idx(RDS_USAGE)?;
    let lambda = idx(LAMBDA_INVOCATIONS)?;
    let cost = idx(DAILY_COST)?;

    table
        .rows()
        .iter()
        .map(|row| -> Result<CanonicalRecord, SchemaViolation> {
            let date = cell_date(&row[date_idx])
                .ok_or_else(|| single(DATE, Problem::InvalidDate { rows: 1 }))?;
            Ok(CanonicalRecord {
                date,
                ec2_hours: row[ec2].as_f64().unwrap_or_default(),
                storage_gb: row[storage].as_f64().unwrap_or_default(),
                data_transfer_gb: row[transfer].as_f64().unwrap_or_default(),
                rds_usage: row[rds].as_f64().unwrap_or_default(),
                lambda_invocations: row[lambda].as_f64().unwrap_or_default() as u64,
                daily_cost: row[cost].as_f64().unwrap_or_default(),
            })
        })
        .collect()
}

fn cell_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Date(d) => Some(*d),
        Value::Text(s) => parse_date(s),
        _ => None,
    }
}

fn single(column: &str, problem: Problem) -> SchemaViolation {
    SchemaViolation {
        failures: vec![ColumnFailure {
            column: column.to_string(),
            problems: vec![problem],
        }],
    }
}
