//! Lag, rolling and calendar features over a canonical table

use chrono::{Datelike, NaiveDate, Weekday};

use crate::data::{parse_date, Table, Value, DAILY_COST, DATE};

pub const LAG_1: &str = "lag_1";
pub const ROLLING_3: &str = "rolling_3";
pub const ROLLING_7: &str = "rolling_7";
pub const IS_WEEKEND: &str = "is_weekend";

/// Columns appended by [`engineer`], in order
pub const DERIVED_COLUMNS: [&str; 4] = [LAG_1, ROLLING_3, ROLLING_7, IS_WEEKEND];

/// Errors from feature engineering
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeatureError {
    /// Temporal key or target column is absent
    #[error("Missing column(s) {columns:?} required for feature engineering. Available columns: {available:?}")]
    MissingColumn {
        columns: Vec<String>,
        available: Vec<String>,
    },

    /// A key or target cell has the wrong type
    #[error("Invalid value in '{column}' at row {row}: expected {expected}, got {found}")]
    InvalidValue {
        column: String,
        row: usize,
        expected: &'static str,
        found: String,
    },
}

/// Require every named column to be present, reporting all that are not
pub(crate) fn require_columns(table: &Table, names: &[&str]) -> Result<(), FeatureError> {
    let missing: Vec<String> = names
        .iter()
        .filter(|n| !table.has_column(n))
        .map(|n| n.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(FeatureError::MissingColumn {
            columns: missing,
            available: table.columns().to_vec(),
        })
    }
}

pub(crate) fn date_cells(table: &Table) -> Result<Vec<NaiveDate>, FeatureError> {
    let cells = table.column(DATE).ok_or_else(|| FeatureError::MissingColumn {
        columns: vec![DATE.to_string()],
        available: table.columns().to_vec(),
    })?;
    cells
        .enumerate()
        .map(|(row, cell)| {
            let parsed = match cell {
                Value::Date(d) => Some(*d),
                Value::Text(s) => parse_date(s),
                _ => None,
            };
            parsed.ok_or_else(|| invalid(DATE, row, "date", cell))
        })
        .collect()
}

pub(crate) fn numeric_cells(table: &Table, column: &str) -> Result<Vec<f64>, FeatureError> {
    let cells = table
        .column(column)
        .ok_or_else(|| FeatureError::MissingColumn {
            columns: vec![column.to_string()],
            available: table.columns().to_vec(),
        })?;
    cells
        .enumerate()
        .map(|(row, cell)| cell.as_f64().ok_or_else(|| invalid(column, row, "number", cell)))
        .collect()
}

fn invalid(column: &str, row: usize, expected: &'static str, cell: &Value) -> FeatureError {
    FeatureError::InvalidValue {
        column: column.to_string(),
        row,
        expected,
        found: format!("{} '{cell}'", cell.type_name()),
    }
}

/// Previous value, or zero for the first row
pub fn lag_feature(values: &[f64]) -> Vec<f64> {
    std::iter::once(0.0)
        .chain(values.iter().copied())
        .take(values.len())
        .collect()
}

/// Mean of the `window` values strictly before each row.
///
/// Rows without a full prior window fall back to their own value, so the
/// current row never contributes to its own average once the window exists.
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            if window == 0 || i < window {
                values[i]
            } else {
                values[i - window..i].iter().sum::<f64>() / window as f64
            }
        })
        .collect()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Sort by date and append lag, rolling and weekend columns.
///
/// The sort is stable so rows sharing a date keep their relative order.
/// Returns a new table; the input is left untouched. Existing derived columns
/// are overwritten rather than duplicated.
pub fn engineer(table: &Table) -> Result<Table, FeatureError> {
    require_columns(table, &[DATE, DAILY_COST])?;

    let dates = date_cells(table)?;
    let costs = numeric_cells(table, DAILY_COST)?;

    let mut order: Vec<usize> = (0..table.len()).collect();
    order.sort_by_key(|&i| dates[i]);

    let sorted = table.reorder(&order);
    let dates: Vec<NaiveDate> = order.iter().map(|&i| dates[i]).collect();
    let costs: Vec<f64> = order.iter().map(|&i| costs[i]).collect();

    let floats = |v: Vec<f64>| v.into_iter().map(Value::Float).collect::<Vec<_>>();
    let weekend = dates
        .iter()
        .map(|&d| Value::Int(i64::from(is_weekend(d))))
        .collect();

    let out = sorted
        .with_column(DATE, dates.iter().copied().map(Value::Date).collect())
        .with_column(LAG_1, floats(lag_feature(&costs)))
        .with_column(ROLLING_3, floats(trailing_mean(&costs, 3)))
        .with_column(ROLLING_7, floats(trailing_mean(&costs, 7)))
        .with_column(IS_WEEKEND, weekend);

    log::debug!(
        "Engineered {} derived columns over {} rows",
        DERIVED_COLUMNS.len(),
        out.len()
    );
    Ok(out)
}
